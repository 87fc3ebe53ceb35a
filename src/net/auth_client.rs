//! Thin client for the managed identity service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the
//! service's REST gateway, plus localStorage persistence of the issued
//! session bundle. Server-side (SSR): stubs returning errors since the
//! gateway is only reachable from the browser.
//!
//! DESIGN
//! ======
//! The service owns credentials, token issuance, OTP delivery, and the
//! OAuth handshake; this client only shapes request payloads and holds
//! the issued [`Session`]. Every token-bearing response and sign-out
//! publishes a session-change event through an explicit observer
//! registry; the auth state holder is the sole subscriber.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "auth_client_test.rs"]
mod auth_client_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::net::types::Session;

/// localStorage key holding the serialized session bundle.
#[cfg(feature = "hydrate")]
const SESSION_STORAGE_KEY: &str = "krishi_auth_session";

const NOT_BROWSER: &str = "not available on server";

type SessionListener = Box<dyn Fn(Option<Session>) + Send + Sync>;

#[derive(Default)]
struct ClientInner {
    session: Mutex<Option<Session>>,
    listeners: Mutex<Vec<(u64, SessionListener)>>,
    next_listener_id: Mutex<u64>,
}

/// Handle to the identity service, shared by cheap clone.
#[derive(Clone, Default)]
pub struct AuthClient {
    inner: Arc<ClientInner>,
}

/// Registration handle returned by [`AuthClient::on_session_change`].
///
/// The listener stays installed until `unsubscribe` is called.
pub struct SessionSubscription {
    inner: Arc<ClientInner>,
    id: u64,
}

impl SessionSubscription {
    /// Remove the listener this handle was issued for.
    pub fn unsubscribe(self) {
        let mut listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|(id, _)| *id != self.id);
    }
}

impl AuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for session-change events.
    ///
    /// Events fire on every sign-in, verification, restore-from-storage,
    /// and sign-out, each carrying the full replacement session.
    pub fn on_session_change(
        &self,
        listener: impl Fn(Option<Session>) + Send + Sync + 'static,
    ) -> SessionSubscription {
        let id = {
            let mut next = self
                .inner
                .next_listener_id
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let id = *next;
            *next += 1;
            id
        };
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(listener)));
        SessionSubscription { inner: Arc::clone(&self.inner), id }
    }

    /// The session currently held by the client, restoring a persisted
    /// bundle on first use.
    ///
    /// A restore publishes a session-change event, mirroring the
    /// service's initial notification on page load; an already-cached
    /// session is returned without one.
    pub async fn current_session(&self) -> Option<Session> {
        if let Some(session) = self.in_memory() {
            return Some(session);
        }
        #[cfg(feature = "hydrate")]
        {
            if let Some(stored) = read_stored_session() {
                *self
                    .inner
                    .session
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(stored.clone());
                self.notify(Some(stored.clone()));
                return Some(stored);
            }
        }
        None
    }

    /// Register an account by email via `POST /auth/v1/signup`.
    ///
    /// The service sends a verification email linking back to the site;
    /// no session is issued until the address is confirmed.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message if registration fails.
    pub async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        phone: &str,
    ) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name, "phone": phone },
                "email_redirect_to": site_redirect_url(),
            });
            post_json("/signup", &payload).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password, full_name, phone);
            Err(NOT_BROWSER.to_owned())
        }
    }

    /// Register an account by phone via `POST /auth/v1/signup`.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message if registration fails.
    pub async fn sign_up_with_phone(
        &self,
        phone: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({
                "phone": phone,
                "password": password,
                "data": { "full_name": full_name },
            });
            post_json("/signup", &payload).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (phone, password, full_name);
            Err(NOT_BROWSER.to_owned())
        }
    }

    /// Exchange email + password for a session.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on rejected credentials.
    pub async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            let session = request_session(&payload).await?;
            self.store_session(Some(session));
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(NOT_BROWSER.to_owned())
        }
    }

    /// Exchange an E.164 phone number + password for a session.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on rejected credentials.
    pub async fn sign_in_with_phone(&self, phone: &str, password: &str) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "phone": phone, "password": password });
            let session = request_session(&payload).await?;
            self.store_session(Some(session));
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (phone, password);
            Err(NOT_BROWSER.to_owned())
        }
    }

    /// Ask the service to text a one-time code via `POST /auth/v1/otp`.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message (e.g. rate limit) on failure.
    pub async fn send_otp(&self, phone: &str) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "phone": phone });
            post_json("/otp", &payload).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = phone;
            Err(NOT_BROWSER.to_owned())
        }
    }

    /// Redeem a one-time code via `POST /auth/v1/verify`.
    ///
    /// A session is issued on success and published through the
    /// session-change registry.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on an invalid or expired code.
    pub async fn verify_otp(&self, phone: &str, token: &str) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "type": "sms", "phone": phone, "token": token });
            let resp = post_json("/verify", &payload).await?;
            let session = resp.json::<Session>().await.map_err(|e| e.to_string())?;
            self.store_session(Some(session));
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (phone, token);
            Err(NOT_BROWSER.to_owned())
        }
    }

    /// Navigate the browser to the service's OAuth authorize endpoint.
    ///
    /// No local state changes here; the redirect back to the site
    /// carries the session, which the restore path then publishes.
    ///
    /// # Errors
    ///
    /// Returns an error string if no browser navigation is possible.
    pub fn sign_in_with_oauth(&self, provider: &str) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let url = oauth_authorize_url(provider, &site_redirect_url());
            let window = web_sys::window().ok_or_else(|| NOT_BROWSER.to_owned())?;
            window
                .location()
                .set_href(&url)
                .map_err(|_| "browser navigation failed".to_owned())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = provider;
            Err(NOT_BROWSER.to_owned())
        }
    }

    /// Terminate the session via `POST /auth/v1/logout`.
    ///
    /// The local session is cleared and a change event published even if
    /// the service call fails; the server-side grant then simply expires
    /// on its own.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message if revocation fails.
    pub async fn sign_out(&self) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let result = match self.in_memory() {
                Some(session) => {
                    let request = gloo_net::http::Request::post(&auth_endpoint("/logout"))
                        .header("Authorization", &format!("Bearer {}", session.access_token));
                    match request.send().await {
                        Ok(resp) if resp.ok() => Ok(()),
                        Ok(resp) => {
                            let status = resp.status();
                            let body = resp.text().await.unwrap_or_default();
                            Err(service_error_message(status, &body))
                        }
                        Err(e) => Err(e.to_string()),
                    }
                }
                None => Ok(()),
            };
            self.store_session(None);
            result
        }
        #[cfg(not(feature = "hydrate"))]
        {
            self.store_session(None);
            Ok(())
        }
    }

    fn in_memory(&self) -> Option<Session> {
        self.inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_session(&self, session: Option<Session>) {
        *self
            .inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = session.clone();
        persist_session(session.as_ref());
        self.notify(session);
    }

    fn notify(&self, session: Option<Session>) {
        // Listeners run with the registry lock held; subscribing or
        // unsubscribing from inside a callback would deadlock.
        let listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, listener) in listeners.iter() {
            listener(session.clone());
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn auth_endpoint(path: &str) -> String {
    let base = option_env!("KRISHI_AUTH_BASE").unwrap_or("/auth/v1");
    format!("{base}{path}")
}

#[cfg(any(test, feature = "hydrate"))]
fn oauth_authorize_url(provider: &str, redirect_to: &str) -> String {
    format!(
        "{}?provider={provider}&redirect_to={redirect_to}",
        auth_endpoint("/authorize")
    )
}

/// Extract the human-readable message from a service error body.
///
/// The service reports opaque messages under a few different keys
/// depending on the endpoint; fall back to the HTTP status.
#[cfg(any(test, feature = "hydrate"))]
fn service_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["msg", "message", "error_description"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_owned();
                }
            }
        }
    }
    format!("authentication request failed: {status}")
}

#[cfg(feature = "hydrate")]
async fn post_json(
    path: &str,
    payload: &serde_json::Value,
) -> Result<gloo_net::http::Response, String> {
    let resp = gloo_net::http::Request::post(&auth_endpoint(path))
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if resp.ok() {
        Ok(resp)
    } else {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(service_error_message(status, &body))
    }
}

#[cfg(feature = "hydrate")]
async fn request_session(payload: &serde_json::Value) -> Result<Session, String> {
    let resp = post_json("/token?grant_type=password", payload).await?;
    resp.json::<Session>().await.map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
fn site_redirect_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .map_or_else(|| "/".to_owned(), |origin| format!("{origin}/"))
}

#[cfg(feature = "hydrate")]
fn read_stored_session() -> Option<Session> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let raw = storage.get_item(SESSION_STORAGE_KEY).ok()??;
    let session: Session = serde_json::from_str(&raw).ok()?;
    #[allow(clippy::cast_possible_truncation)]
    let now_secs = (js_sys::Date::now() / 1000.0) as i64;
    if session.is_expired_at(now_secs) {
        let _ = storage.remove_item(SESSION_STORAGE_KEY);
        return None;
    }
    Some(session)
}

#[cfg(feature = "hydrate")]
fn persist_session(session: Option<&Session>) {
    let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };
    match session {
        Some(session) => {
            if let Ok(raw) = serde_json::to_string(session) {
                let _ = storage.set_item(SESSION_STORAGE_KEY, &raw);
            }
        }
        None => {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

#[cfg(not(feature = "hydrate"))]
fn persist_session(session: Option<&Session>) {
    let _ = session;
}
