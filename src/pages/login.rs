//! Login/signup page: phone-first authentication form.
//!
//! ARCHITECTURE
//! ============
//! The page owns UI-only state (mode, login method, OTP flow, resend
//! cooldown, field errors) and dispatches submits to the shared
//! `AuthContext`. Validation and dispatch decisions are pure functions
//! so the form's behavior is unit-testable without a browser.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::state::auth::AuthContext;
use crate::util::phone::{is_valid_phone, sanitize_otp_input, sanitize_phone_input};

/// Seconds the resend control stays disabled after a code dispatch.
pub const RESEND_COOLDOWN_SECS: u32 = 60;

const MIN_PASSWORD_LEN: usize = 6;

const PHONE_REQUIRED: &str = "Phone number is required";
const PHONE_INVALID: &str = "Enter a valid 10-digit phone number";
const FULL_NAME_REQUIRED: &str = "Full name is required";
const PASSWORD_REQUIRED: &str = "Password is required";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
const OTP_REQUIRED: &str = "Enter the code sent to your phone";

/// Which top-level form the user is on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// How a login-mode submit authenticates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginMethod {
    #[default]
    Password,
    Otp,
}

/// Form fields that carry their own validation error slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Phone,
    FullName,
    Password,
    Otp,
}

/// Per-field validation errors; `None` means the field is clean.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub phone: Option<String>,
    pub full_name: Option<String>,
    pub password: Option<String>,
    pub otp: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none()
            && self.full_name.is_none()
            && self.password.is_none()
            && self.otp.is_none()
    }

    /// Clear one field's error, leaving the others intact.
    ///
    /// Called on every keystroke in the corresponding input.
    pub fn clear(&mut self, field: FormField) {
        match field {
            FormField::Phone => self.phone = None,
            FormField::FullName => self.full_name = None,
            FormField::Password => self.password = None,
            FormField::Otp => self.otp = None,
        }
    }
}

/// What a submit should do given the current mode/method/code state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitAction {
    VerifyOtp,
    SignIn,
    SignUp,
}

/// Validate the form for submission. Each field is checked
/// independently so one failure never masks another.
pub fn validate(
    mode: AuthMode,
    method: LoginMethod,
    otp_sent: bool,
    phone: &str,
    full_name: &str,
    password: &str,
    otp: &str,
) -> FormErrors {
    let mut errors = FormErrors::default();

    if phone.is_empty() {
        errors.phone = Some(PHONE_REQUIRED.to_owned());
    } else if !is_valid_phone(phone) {
        errors.phone = Some(PHONE_INVALID.to_owned());
    }

    if mode == AuthMode::Signup && full_name.trim().is_empty() {
        errors.full_name = Some(FULL_NAME_REQUIRED.to_owned());
    }

    if method == LoginMethod::Password || mode == AuthMode::Signup {
        if password.is_empty() {
            errors.password = Some(PASSWORD_REQUIRED.to_owned());
        } else if password.chars().count() < MIN_PASSWORD_LEN {
            errors.password = Some(PASSWORD_TOO_SHORT.to_owned());
        }
    }

    if mode == AuthMode::Login && method == LoginMethod::Otp && otp_sent && otp.is_empty() {
        errors.otp = Some(OTP_REQUIRED.to_owned());
    }

    errors
}

/// Pick the operation a submit dispatches to.
pub fn submit_action(mode: AuthMode, method: LoginMethod, otp_sent: bool) -> SubmitAction {
    if method == LoginMethod::Otp && otp_sent {
        SubmitAction::VerifyOtp
    } else if mode == AuthMode::Login {
        SubmitAction::SignIn
    } else {
        SubmitAction::SignUp
    }
}

/// State adjustments for a login/signup toggle: the sent flag always
/// resets, and entering signup forces password-based login.
pub fn mode_transition(target: AuthMode, method: LoginMethod) -> (AuthMode, LoginMethod, bool) {
    let method = if target == AuthMode::Signup { LoginMethod::Password } else { method };
    (target, method, false)
}

/// Decrement the cooldown by one tick; returns true once it hits zero.
pub fn countdown_step(remaining: &mut u32) -> bool {
    *remaining = remaining.saturating_sub(1);
    *remaining == 0
}

/// One-second cooldown ticker; ends at zero or when the page holding
/// the signal is torn down.
#[cfg(feature = "hydrate")]
fn start_countdown(timer: RwSignal<u32>) {
    leptos::task::spawn_local(async move {
        loop {
            gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
            let done = timer.try_update(countdown_step).unwrap_or(true);
            if done {
                break;
            }
        }
    });
}

/// Phone-first login/signup screen with password and OTP flows plus
/// Google OAuth. Redirects to the originally-requested page (the `from`
/// query parameter) once a user is present.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let query = use_query_map();

    let mode = RwSignal::new(AuthMode::Login);
    let method = RwSignal::new(LoginMethod::Password);
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::default());
    let otp_sent = RwSignal::new(false);
    let resend_timer = RwSignal::new(0_u32);
    let busy = RwSignal::new(false);

    // Leave as soon as a user is signed in, whichever flow produced it.
    {
        let auth = auth.clone();
        Effect::new(move || {
            let state = auth.state.get();
            if !state.loading && state.user.is_some() {
                let from = query
                    .get()
                    .get("from")
                    .filter(|from| !from.is_empty())
                    .unwrap_or_else(|| "/".to_owned());
                navigate(&from, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        });
    }

    let set_mode = move |target: AuthMode| {
        let (next_mode, next_method, sent) = mode_transition(target, method.get());
        mode.set(next_mode);
        method.set(next_method);
        otp_sent.set(sent);
        errors.set(FormErrors::default());
    };

    let set_method = move |target: LoginMethod| {
        method.set(target);
        otp_sent.set(false);
    };

    let send_code = {
        let auth = auth.clone();
        move |_ev: leptos::ev::MouseEvent| {
            let digits = phone.get();
            if !is_valid_phone(&digits) {
                errors.update(|e| e.phone = Some(PHONE_INVALID.to_owned()));
                return;
            }
            if busy.get() {
                return;
            }
            busy.set(true);

            let auth = auth.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                if auth.send_otp(&digits).await.is_ok() {
                    let _ = otp_sent.try_set(true);
                    let _ = resend_timer.try_set(RESEND_COOLDOWN_SECS);
                    start_countdown(resend_timer);
                }
                let _ = busy.try_set(false);
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = auth;
                busy.set(false);
            }
        }
    };

    let on_submit = {
        let auth = auth.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get() {
                return;
            }

            let validation = validate(
                mode.get(),
                method.get(),
                otp_sent.get(),
                &phone.get(),
                &full_name.get(),
                &password.get(),
                &otp.get(),
            );
            if !validation.is_empty() {
                errors.set(validation);
                return;
            }
            errors.set(FormErrors::default());
            busy.set(true);

            let action = submit_action(mode.get(), method.get(), otp_sent.get());
            let auth = auth.clone();
            let phone_value = phone.get();
            let password_value = password.get();
            let name_value = full_name.get();
            let otp_value = otp.get();

            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match action {
                    SubmitAction::VerifyOtp => {
                        // Success lands through the session-change
                        // listener; nothing more to do here.
                        if let Err(message) = auth.verify_otp(&phone_value, &otp_value).await {
                            leptos::logging::warn!("code verification failed: {message}");
                        }
                    }
                    SubmitAction::SignIn => {
                        if let Err(message) =
                            auth.sign_in_with_phone(&phone_value, &password_value).await
                        {
                            leptos::logging::warn!("phone sign-in failed: {message}");
                        }
                    }
                    SubmitAction::SignUp => {
                        match auth
                            .sign_up_with_phone(&phone_value, &password_value, &name_value)
                            .await
                        {
                            Ok(()) => {
                                let current = method.try_get_untracked().unwrap_or_default();
                                let (next_mode, next_method, sent) =
                                    mode_transition(AuthMode::Login, current);
                                let _ = mode.try_set(next_mode);
                                let _ = method.try_set(next_method);
                                let _ = otp_sent.try_set(sent);
                            }
                            Err(message) => {
                                leptos::logging::warn!("phone sign-up failed: {message}");
                            }
                        }
                    }
                }
                let _ = busy.try_set(false);
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (auth, action, phone_value, password_value, name_value, otp_value);
                busy.set(false);
            }
        }
    };

    let on_google = {
        let auth = auth.clone();
        move |_ev: leptos::ev::MouseEvent| {
            // Failures toast through the holder; a successful call
            // navigates away entirely.
            let _ = auth.sign_in_with_google();
        }
    };

    let send_code_resend = send_code.clone();

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <header class="auth-card__header">
                    <div class="auth-card__brand">
                        <span class="auth-card__logo" aria-hidden="true">"🌾"</span>
                        <h1>"Krishi"</h1>
                    </div>
                    <h2 class="auth-card__title">
                        {move || match mode.get() {
                            AuthMode::Login => "Welcome Back, Farmer!",
                            AuthMode::Signup => "Join Krishi",
                        }}
                    </h2>
                    <p class="auth-card__subtitle">
                        "Login easily with your phone number or Google account"
                    </p>
                </header>

                <div class="auth-tabs">
                    <button
                        type="button"
                        class=move || tab_class(mode.get() == AuthMode::Login)
                        on:click=move |_| set_mode(AuthMode::Login)
                    >
                        "Login"
                    </button>
                    <button
                        type="button"
                        class=move || tab_class(mode.get() == AuthMode::Signup)
                        on:click=move |_| set_mode(AuthMode::Signup)
                    >
                        "Sign Up"
                    </button>
                </div>

                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || mode.get() == AuthMode::Signup>
                        <div class="auth-field">
                            <label class="auth-field__label">"Full Name"</label>
                            <input
                                id="full-name"
                                class=move || field_class(errors.get().full_name.is_some())
                                type="text"
                                placeholder="Enter your full name"
                                prop:value=move || full_name.get()
                                on:input=move |ev| {
                                    full_name.set(event_target_value(&ev));
                                    errors.update(|e| e.clear(FormField::FullName));
                                }
                            />
                            <Show when=move || errors.get().full_name.is_some()>
                                <p class="auth-field__error">
                                    {move || errors.get().full_name.unwrap_or_default()}
                                </p>
                            </Show>
                        </div>
                    </Show>

                    <div class="auth-field">
                        <label class="auth-field__label">"Phone Number"</label>
                        <div class="auth-phone-row">
                            <span class="auth-phone-row__prefix">"+91"</span>
                            <input
                                id="phone"
                                class=move || field_class(errors.get().phone.is_some())
                                type="tel"
                                maxlength="10"
                                placeholder="Enter 10-digit number"
                                prop:value=move || phone.get()
                                on:input=move |ev| {
                                    phone.set(sanitize_phone_input(&event_target_value(&ev)));
                                    errors.update(|e| e.clear(FormField::Phone));
                                }
                            />
                        </div>
                        <Show when=move || errors.get().phone.is_some()>
                            <p class="auth-field__error">
                                {move || errors.get().phone.unwrap_or_default()}
                            </p>
                        </Show>
                    </div>

                    <Show when=move || mode.get() == AuthMode::Login>
                        <div class="auth-method">
                            <button
                                type="button"
                                class=move || method_class(method.get() == LoginMethod::Password)
                                on:click=move |_| set_method(LoginMethod::Password)
                            >
                                "Password"
                            </button>
                            <button
                                type="button"
                                class=move || method_class(method.get() == LoginMethod::Otp)
                                on:click=move |_| set_method(LoginMethod::Otp)
                            >
                                "OTP"
                            </button>
                        </div>
                    </Show>

                    <Show when=move || {
                        method.get() == LoginMethod::Password || mode.get() == AuthMode::Signup
                    }>
                        <div class="auth-field">
                            <label class="auth-field__label">"Password"</label>
                            <input
                                id="password"
                                class=move || field_class(errors.get().password.is_some())
                                type="password"
                                placeholder="Enter password (min 6 characters)"
                                prop:value=move || password.get()
                                on:input=move |ev| {
                                    password.set(event_target_value(&ev));
                                    errors.update(|e| e.clear(FormField::Password));
                                }
                            />
                            <Show when=move || errors.get().password.is_some()>
                                <p class="auth-field__error">
                                    {move || errors.get().password.unwrap_or_default()}
                                </p>
                            </Show>
                        </div>
                    </Show>

                    <Show when=move || {
                        mode.get() == AuthMode::Login && method.get() == LoginMethod::Otp
                    }>
                        {
                            let send_code_resend = send_code_resend.clone();
                            view! {
                        <div class="auth-otp">
                            <Show
                                when=move || otp_sent.get()
                                fallback={
                                    let send_code = send_code.clone();
                                    move || {
                                        let send_code = send_code.clone();
                                        view! {
                                            <button
                                                type="button"
                                                class="btn btn--primary auth-otp__send"
                                                disabled=move || {
                                                    busy.get() || !is_valid_phone(&phone.get())
                                                }
                                                on:click=send_code
                                            >
                                                {move || if busy.get() { "Sending..." } else { "Send OTP" }}
                                            </button>
                                        }
                                    }
                                }
                            >
                                <div class="auth-field">
                                    <label class="auth-field__label">"Enter OTP"</label>
                                    <input
                                        id="otp"
                                        class=move || {
                                            format!(
                                                "{} auth-field__input--code",
                                                field_class(errors.get().otp.is_some()),
                                            )
                                        }
                                        type="text"
                                        maxlength="6"
                                        placeholder="Enter 6-digit OTP"
                                        prop:value=move || otp.get()
                                        on:input=move |ev| {
                                            otp.set(sanitize_otp_input(&event_target_value(&ev)));
                                            errors.update(|e| e.clear(FormField::Otp));
                                        }
                                    />
                                    <Show when=move || errors.get().otp.is_some()>
                                        <p class="auth-field__error">
                                            {move || errors.get().otp.unwrap_or_default()}
                                        </p>
                                    </Show>
                                </div>

                                <div class="auth-otp__resend">
                                    <span class="auth-otp__hint">"Didn't receive OTP?"</span>
                                    <Show
                                        when=move || (resend_timer.get() > 0)
                                        fallback={
                                            let send_code = send_code_resend.clone();
                                            move || {
                                                let send_code = send_code.clone();
                                                view! {
                                                    <button
                                                        type="button"
                                                        class="auth-link"
                                                        disabled=move || busy.get()
                                                        on:click=send_code
                                                    >
                                                        "Resend OTP"
                                                    </button>
                                                }
                                            }
                                        }
                                    >
                                        <span class="auth-otp__countdown">
                                            {move || format!("Resend in {}s", resend_timer.get())}
                                        </span>
                                    </Show>
                                </div>
                            </Show>
                        </div>
                            }
                        }
                    </Show>

                    <Show when=move || {
                        method.get() == LoginMethod::Password
                            || mode.get() == AuthMode::Signup
                            || otp_sent.get()
                    }>
                        <button
                            type="submit"
                            class="btn btn--primary auth-form__submit"
                            disabled=move || busy.get()
                        >
                            {move || {
                                if busy.get() {
                                    "Please wait..."
                                } else {
                                    match mode.get() {
                                        AuthMode::Login => "Login",
                                        AuthMode::Signup => "Create Account",
                                    }
                                }
                            }}
                        </button>
                    </Show>
                </form>

                <div class="auth-divider">
                    <span>"Or continue with"</span>
                </div>

                <button type="button" class="btn auth-google" disabled=move || busy.get() on:click=on_google>
                    <span class="auth-google__icon" aria-hidden="true">"G"</span>
                    "Sign in with Google"
                </button>

                <p class="auth-card__switch">
                    <Show
                        when=move || mode.get() == AuthMode::Login
                        fallback=move || {
                            view! {
                                "Already have an account? "
                                <button
                                    type="button"
                                    class="auth-link"
                                    on:click=move |_| set_mode(AuthMode::Login)
                                >
                                    "Login"
                                </button>
                            }
                        }
                    >
                        "New user? "
                        <button
                            type="button"
                            class="auth-link"
                            on:click=move |_| set_mode(AuthMode::Signup)
                        >
                            "Create account"
                        </button>
                    </Show>
                </p>
            </div>
        </div>
    }
}

fn tab_class(active: bool) -> &'static str {
    if active { "auth-tabs__tab auth-tabs__tab--active" } else { "auth-tabs__tab" }
}

fn method_class(active: bool) -> &'static str {
    if active { "auth-method__option auth-method__option--active" } else { "auth-method__option" }
}

fn field_class(has_error: bool) -> &'static str {
    if has_error { "auth-field__input auth-field__input--invalid" } else { "auth-field__input" }
}
