use super::*;

fn sample_session_json() -> serde_json::Value {
    serde_json::json!({
        "access_token": "tok-abc",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1_900_000_000_i64,
        "refresh_token": "ref-xyz",
        "user": {
            "id": "u-1",
            "email": null,
            "phone": "+919876543210",
            "user_metadata": { "full_name": "Asha Devi" }
        }
    })
}

#[test]
fn session_deserializes_service_payload() {
    let session: Session = serde_json::from_value(sample_session_json()).expect("session");
    assert_eq!(session.access_token, "tok-abc");
    assert_eq!(session.user.id, "u-1");
    assert_eq!(session.user.user_metadata.full_name.as_deref(), Some("Asha Devi"));
}

#[test]
fn session_tolerates_missing_metadata() {
    let mut value = sample_session_json();
    value["user"].as_object_mut().expect("user").remove("user_metadata");
    let session: Session = serde_json::from_value(value).expect("session");
    assert!(session.user.user_metadata.full_name.is_none());
}

#[test]
fn expiry_is_inclusive_of_the_boundary() {
    let session: Session = serde_json::from_value(sample_session_json()).expect("session");
    assert!(!session.is_expired_at(1_899_999_999));
    assert!(session.is_expired_at(1_900_000_000));
    assert!(session.is_expired_at(1_900_000_001));
}

#[test]
fn sessions_without_expiry_are_treated_as_live() {
    let mut value = sample_session_json();
    value["expires_at"] = serde_json::Value::Null;
    let session: Session = serde_json::from_value(value).expect("session");
    assert!(!session.is_expired_at(i64::MAX));
}

#[test]
fn display_name_prefers_metadata_then_phone_then_email() {
    let mut session: Session = serde_json::from_value(sample_session_json()).expect("session");
    assert_eq!(session.user.display_name(), "Asha Devi");

    session.user.user_metadata.full_name = None;
    assert_eq!(session.user.display_name(), "+919876543210");

    session.user.phone = None;
    session.user.email = Some("asha@example.com".to_owned());
    assert_eq!(session.user.display_name(), "asha@example.com");
}
