//! Phone number validation and normalization.
//!
//! DESIGN
//! ======
//! The app is phone-first for Indian mobile numbers: users type the 10
//! national digits and the country code is applied at the service
//! boundary. Validation mirrors the national numbering plan (mobile
//! numbers start 6-9).

#[cfg(test)]
#[path = "phone_test.rs"]
mod phone_test;

/// Country calling code applied to every number sent to the identity
/// service.
pub const COUNTRY_CODE: &str = "+91";

/// Whether `digits` is a valid 10-digit Indian mobile number.
///
/// Accepts exactly 10 ASCII digits with a leading digit of 6-9.
pub fn is_valid_phone(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    bytes.len() == 10
        && bytes.iter().all(u8::is_ascii_digit)
        && matches!(bytes[0], b'6'..=b'9')
}

/// Prefix `phone` with [`COUNTRY_CODE`] unless it already carries it.
///
/// The identity service expects E.164-style numbers on every call.
pub fn normalize_phone(phone: &str) -> String {
    if phone.starts_with(COUNTRY_CODE) {
        phone.to_owned()
    } else {
        format!("{COUNTRY_CODE}{phone}")
    }
}

/// Keep only digits and truncate to the 10-digit national length.
///
/// Applied on every keystroke in the phone input.
pub fn sanitize_phone_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(10).collect()
}

/// Keep only digits and truncate to the 6-digit code length.
///
/// Applied on every keystroke in the OTP input.
pub fn sanitize_otp_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(6).collect()
}
