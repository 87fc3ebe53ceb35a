use super::*;

fn valid_login_input() -> (&'static str, &'static str, &'static str, &'static str) {
    ("9876543210", "", "secret1", "")
}

// =============================================================
// validate
// =============================================================

#[test]
fn clean_password_login_passes() {
    let (phone, name, password, otp) = valid_login_input();
    let errors = validate(AuthMode::Login, LoginMethod::Password, false, phone, name, password, otp);
    assert!(errors.is_empty());
}

#[test]
fn phone_is_required_and_must_be_valid() {
    let errors = validate(AuthMode::Login, LoginMethod::Password, false, "", "", "secret1", "");
    assert_eq!(errors.phone.as_deref(), Some("Phone number is required"));

    let errors =
        validate(AuthMode::Login, LoginMethod::Password, false, "1234567890", "", "secret1", "");
    assert_eq!(errors.phone.as_deref(), Some("Enter a valid 10-digit phone number"));
}

#[test]
fn signup_requires_a_full_name() {
    let errors =
        validate(AuthMode::Signup, LoginMethod::Password, false, "9876543210", "", "secret1", "");
    assert_eq!(errors.full_name.as_deref(), Some("Full name is required"));
    assert!(errors.phone.is_none());
    assert!(errors.password.is_none());
}

#[test]
fn login_mode_never_requires_a_full_name() {
    let errors =
        validate(AuthMode::Login, LoginMethod::Password, false, "9876543210", "", "secret1", "");
    assert!(errors.full_name.is_none());
}

#[test]
fn password_minimum_length_is_six() {
    let errors =
        validate(AuthMode::Login, LoginMethod::Password, false, "9876543210", "", "12345", "");
    assert_eq!(errors.password.as_deref(), Some("Password must be at least 6 characters"));

    let errors =
        validate(AuthMode::Login, LoginMethod::Password, false, "9876543210", "", "123456", "");
    assert!(errors.password.is_none());
}

#[test]
fn password_is_not_checked_in_otp_login() {
    let errors = validate(AuthMode::Login, LoginMethod::Otp, false, "9876543210", "", "", "");
    assert!(errors.password.is_none());
}

#[test]
fn otp_is_required_only_after_a_code_was_sent() {
    let errors = validate(AuthMode::Login, LoginMethod::Otp, false, "9876543210", "", "", "");
    assert!(errors.otp.is_none());

    let errors = validate(AuthMode::Login, LoginMethod::Otp, true, "9876543210", "", "", "");
    assert_eq!(errors.otp.as_deref(), Some("Enter the code sent to your phone"));

    let errors = validate(AuthMode::Login, LoginMethod::Otp, true, "9876543210", "", "", "123456");
    assert!(errors.otp.is_none());
}

// =============================================================
// FormErrors
// =============================================================

#[test]
fn clearing_one_field_leaves_other_errors_intact() {
    let mut errors = validate(AuthMode::Signup, LoginMethod::Password, false, "12", "", "123", "");
    assert!(errors.phone.is_some());
    assert!(errors.full_name.is_some());
    assert!(errors.password.is_some());

    errors.clear(FormField::Phone);

    assert!(errors.phone.is_none());
    assert!(errors.full_name.is_some());
    assert!(errors.password.is_some());
}

// =============================================================
// submit_action
// =============================================================

#[test]
fn submit_verifies_once_a_code_was_sent() {
    assert_eq!(submit_action(AuthMode::Login, LoginMethod::Otp, true), SubmitAction::VerifyOtp);
}

#[test]
fn submit_signs_in_for_password_login() {
    assert_eq!(submit_action(AuthMode::Login, LoginMethod::Password, false), SubmitAction::SignIn);
}

#[test]
fn submit_registers_in_signup_mode() {
    assert_eq!(submit_action(AuthMode::Signup, LoginMethod::Password, false), SubmitAction::SignUp);
}

// =============================================================
// mode_transition
// =============================================================

#[test]
fn entering_signup_forces_password_method_and_clears_sent_flag() {
    let (mode, method, otp_sent) = mode_transition(AuthMode::Signup, LoginMethod::Otp);
    assert_eq!(mode, AuthMode::Signup);
    assert_eq!(method, LoginMethod::Password);
    assert!(!otp_sent);
}

#[test]
fn returning_to_login_keeps_the_chosen_method() {
    let (mode, method, otp_sent) = mode_transition(AuthMode::Login, LoginMethod::Otp);
    assert_eq!(mode, AuthMode::Login);
    assert_eq!(method, LoginMethod::Otp);
    assert!(!otp_sent);
}

// =============================================================
// countdown
// =============================================================

#[test]
fn countdown_runs_from_sixty_ticks_to_zero() {
    let mut remaining = RESEND_COOLDOWN_SECS;
    for _ in 0..59 {
        assert!(!countdown_step(&mut remaining));
    }
    assert!(countdown_step(&mut remaining));
    assert_eq!(remaining, 0);
}

#[test]
fn countdown_saturates_at_zero() {
    let mut remaining = 0;
    assert!(countdown_step(&mut remaining));
    assert_eq!(remaining, 0);
}
