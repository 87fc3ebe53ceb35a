use std::sync::{Arc, Mutex};

use super::*;
use crate::net::types::{User, UserMetadata};

fn session(user_id: &str) -> Session {
    Session {
        access_token: "tok".to_owned(),
        token_type: "bearer".to_owned(),
        expires_in: Some(3600),
        expires_at: Some(1_900_000_000),
        refresh_token: None,
        user: User {
            id: user_id.to_owned(),
            email: None,
            phone: Some("+919876543210".to_owned()),
            user_metadata: UserMetadata::default(),
        },
    }
}

// =============================================================
// Endpoint + error-message helpers
// =============================================================

#[test]
fn auth_endpoint_joins_gateway_base() {
    assert_eq!(auth_endpoint("/otp"), "/auth/v1/otp");
    assert_eq!(
        auth_endpoint("/token?grant_type=password"),
        "/auth/v1/token?grant_type=password"
    );
}

#[test]
fn oauth_authorize_url_carries_provider_and_redirect() {
    assert_eq!(
        oauth_authorize_url("google", "https://example.com/"),
        "/auth/v1/authorize?provider=google&redirect_to=https://example.com/"
    );
}

#[test]
fn service_error_message_prefers_msg_then_message_then_description() {
    let body = r#"{"msg":"m1","message":"m2","error_description":"m3"}"#;
    assert_eq!(service_error_message(400, body), "m1");

    let body = r#"{"message":"m2","error_description":"m3"}"#;
    assert_eq!(service_error_message(400, body), "m2");

    let body = r#"{"error_description":"m3"}"#;
    assert_eq!(service_error_message(400, body), "m3");
}

#[test]
fn service_error_message_falls_back_to_status() {
    assert_eq!(
        service_error_message(429, "not json"),
        "authentication request failed: 429"
    );
    assert_eq!(
        service_error_message(500, r#"{"msg":""}"#),
        "authentication request failed: 500"
    );
}

// =============================================================
// Session-change registry
// =============================================================

#[test]
fn listeners_receive_stored_sessions() {
    let client = AuthClient::new();
    let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));

    let record = Arc::clone(&seen);
    let _sub = client.on_session_change(move |session| {
        record
            .lock()
            .expect("lock")
            .push(session.map(|s| s.user.id));
    });

    client.store_session(Some(session("u-1")));
    client.store_session(None);

    let events = seen.lock().expect("lock");
    assert_eq!(*events, vec![Some("u-1".to_owned()), None]);
}

#[test]
fn unsubscribed_listeners_stop_receiving_events() {
    let client = AuthClient::new();
    let seen: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));

    let record = Arc::clone(&seen);
    let sub = client.on_session_change(move |_| {
        *record.lock().expect("lock") += 1;
    });

    client.store_session(Some(session("u-1")));
    sub.unsubscribe();
    client.store_session(None);

    assert_eq!(*seen.lock().expect("lock"), 1);
}

#[test]
fn unsubscribe_leaves_other_listeners_installed() {
    let client = AuthClient::new();
    let first: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
    let second: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));

    let record = Arc::clone(&first);
    let sub = client.on_session_change(move |_| {
        *record.lock().expect("lock") += 1;
    });
    let record = Arc::clone(&second);
    let _keep = client.on_session_change(move |_| {
        *record.lock().expect("lock") += 1;
    });

    sub.unsubscribe();
    client.store_session(Some(session("u-2")));

    assert_eq!(*first.lock().expect("lock"), 0);
    assert_eq!(*second.lock().expect("lock"), 1);
}
