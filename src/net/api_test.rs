use super::*;

#[test]
fn profile_endpoint_formats_expected_path() {
    assert_eq!(profile_endpoint("u123"), "/api/profiles/u123");
}
