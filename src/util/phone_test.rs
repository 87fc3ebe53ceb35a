use super::*;

// =============================================================
// is_valid_phone
// =============================================================

#[test]
fn accepts_ten_digit_numbers_starting_six_through_nine() {
    assert!(is_valid_phone("6000000000"));
    assert!(is_valid_phone("7123456789"));
    assert!(is_valid_phone("8999999999"));
    assert!(is_valid_phone("9876543210"));
}

#[test]
fn rejects_wrong_lengths() {
    assert!(!is_valid_phone(""));
    assert!(!is_valid_phone("987654321"));
    assert!(!is_valid_phone("98765432109"));
}

#[test]
fn rejects_leading_zero_through_five() {
    assert!(!is_valid_phone("0876543210"));
    assert!(!is_valid_phone("1876543210"));
    assert!(!is_valid_phone("5876543210"));
}

#[test]
fn rejects_non_digit_characters() {
    assert!(!is_valid_phone("98765abc10"));
    assert!(!is_valid_phone("98765 4321"));
    assert!(!is_valid_phone("+919876543"));
}

// =============================================================
// normalize_phone
// =============================================================

#[test]
fn normalize_prefixes_country_code() {
    assert_eq!(normalize_phone("9876543210"), "+919876543210");
}

#[test]
fn normalize_passes_through_prefixed_numbers() {
    assert_eq!(normalize_phone("+919876543210"), "+919876543210");
}

// =============================================================
// input sanitizers
// =============================================================

#[test]
fn sanitize_phone_strips_non_digits_and_truncates() {
    assert_eq!(sanitize_phone_input("98-76 54(3210)99"), "9876543210");
    assert_eq!(sanitize_phone_input("abc"), "");
}

#[test]
fn sanitize_otp_strips_non_digits_and_truncates() {
    assert_eq!(sanitize_otp_input("1 2 3 4 5 6 7"), "123456");
    assert_eq!(sanitize_otp_input("12x34"), "1234");
}
