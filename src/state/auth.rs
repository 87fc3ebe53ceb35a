//! Authentication state holder: the single source of truth for who is
//! signed in.
//!
//! DESIGN
//! ======
//! `AuthContext` is created once by the root component and provided via
//! context with an explicit lifecycle: `init` attaches the
//! session-change listener and requests the current session, the
//! returned subscription is cancelled on unmount. Every operation
//! delegates to the identity service, reports its outcome through the
//! toast queue, and hands the caller a plain success/failure result
//! rather than a thrown fault.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::auth_client::{AuthClient, SessionSubscription};
use crate::net::types::{Session, User, UserProfile};
use crate::state::toast::{ToastState, ToastVariant};
use crate::util::phone::normalize_phone;

/// Reactive snapshot of the signed-in identity.
#[derive(Clone, Debug)]
pub struct AuthState {
    /// Token bundle issued by the identity service.
    pub session: Option<Session>,
    /// Identity record derived from the session.
    pub user: Option<User>,
    /// Application profile row; fetched after the session lands, so it
    /// may briefly lag behind `user`.
    pub profile: Option<UserProfile>,
    /// True until either startup path has produced a first result.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { session: None, user: None, profile: None, loading: true }
    }
}

/// Replace the session wholesale and derive the dependent fields.
///
/// The profile is cleared when the user goes away but left in place
/// otherwise; the deferred lookup refreshes it.
pub fn apply_session(state: &mut AuthState, session: Option<Session>) {
    state.user = session.as_ref().map(|s| s.user.clone());
    state.session = session;
    if state.user.is_none() {
        state.profile = None;
    }
    state.loading = false;
}

/// Process-wide authentication holder, provided via Leptos context.
#[derive(Clone)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    pub toasts: RwSignal<ToastState>,
    client: AuthClient,
}

impl AuthContext {
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        Self {
            state: RwSignal::new(AuthState::default()),
            toasts,
            client: AuthClient::new(),
        }
    }

    /// Attach the session-change listener, then request the current
    /// session — in that order, so a change landing between the two
    /// calls is never missed. Returns the subscription for teardown.
    pub fn init(&self) -> SessionSubscription {
        let state = self.state;
        let subscription = self.client.on_session_change(move |session| {
            let user_id = session.as_ref().map(|s| s.user.id.clone());
            let _ = state.try_update(|st| apply_session(st, session));
            if let Some(id) = user_id {
                // Deferred one tick so the lookup runs after the
                // service's own dispatch completes instead of
                // re-entering it.
                spawn_profile_fetch(state, id);
            }
        });

        // Covers a session established before the listener attached, for
        // which no change event would fire. The restore path may also
        // publish an event; applying the same session twice is
        // idempotent.
        #[cfg(feature = "hydrate")]
        {
            let client = self.client.clone();
            leptos::task::spawn_local(async move {
                let session = client.current_session().await;
                let _ = state.try_update(|st| apply_session(st, session));
            });
        }

        subscription
    }

    /// Register by email with a post-verification redirect back to the
    /// site.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on failure (also toasted).
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        phone: &str,
    ) -> Result<(), String> {
        let result = self
            .client
            .sign_up_with_email(email, password, full_name, phone)
            .await;
        match &result {
            Ok(()) => self.notify(
                "Success!",
                "Please check your email to verify your account.",
                ToastVariant::Info,
            ),
            Err(message) => self.notify("Signup Error", message, ToastVariant::Destructive),
        }
        result
    }

    /// Sign in with email + password.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on failure (also toasted).
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), String> {
        let result = self.client.sign_in_with_email(email, password).await;
        match &result {
            Ok(()) => self.notify(
                "Welcome back!",
                "You have successfully logged in.",
                ToastVariant::Info,
            ),
            Err(message) => self.notify("Login Error", message, ToastVariant::Destructive),
        }
        result
    }

    /// Sign in with a 10-digit phone number + password.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on failure (also toasted).
    pub async fn sign_in_with_phone(&self, phone: &str, password: &str) -> Result<(), String> {
        let result = self
            .client
            .sign_in_with_phone(&normalize_phone(phone), password)
            .await;
        match &result {
            Ok(()) => self.notify(
                "Welcome back!",
                "You have successfully logged in.",
                ToastVariant::Info,
            ),
            Err(message) => self.notify("Login Error", message, ToastVariant::Destructive),
        }
        result
    }

    /// Register with a 10-digit phone number, password, and name.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on failure (also toasted).
    pub async fn sign_up_with_phone(
        &self,
        phone: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(), String> {
        let result = self
            .client
            .sign_up_with_phone(&normalize_phone(phone), password, full_name)
            .await;
        match &result {
            Ok(()) => self.notify(
                "Success!",
                "Account created successfully. You can now log in.",
                ToastVariant::Info,
            ),
            Err(message) => self.notify("Signup Error", message, ToastVariant::Destructive),
        }
        result
    }

    /// Ask the service to text a one-time code to `phone`.
    ///
    /// The resend cooldown is owned by the form, not by this holder.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on failure (also toasted).
    pub async fn send_otp(&self, phone: &str) -> Result<(), String> {
        let result = self.client.send_otp(&normalize_phone(phone)).await;
        match &result {
            Ok(()) => self.notify(
                "OTP Sent!",
                "Please check your phone for the verification code.",
                ToastVariant::Info,
            ),
            Err(message) => self.notify("OTP Error", message, ToastVariant::Destructive),
        }
        result
    }

    /// Redeem a one-time code.
    ///
    /// Success performs no state mutation here; the session-change event
    /// published by the client is what updates the signed-in state.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on failure (also toasted).
    pub async fn verify_otp(&self, phone: &str, token: &str) -> Result<(), String> {
        let result = self.client.verify_otp(&normalize_phone(phone), token).await;
        match &result {
            Ok(()) => self.notify("Success!", "Phone verified successfully.", ToastVariant::Info),
            Err(message) => {
                self.notify("Verification Error", message, ToastVariant::Destructive);
            }
        }
        result
    }

    /// Redirect the browser to the Google OAuth flow.
    ///
    /// # Errors
    ///
    /// Returns an error message if the redirect fails (also toasted).
    pub fn sign_in_with_google(&self) -> Result<(), String> {
        let result = self.client.sign_in_with_oauth("google");
        if let Err(message) = &result {
            self.notify("Google Sign-In Error", message, ToastVariant::Destructive);
        }
        result
    }

    /// Terminate the current session.
    ///
    /// # Errors
    ///
    /// Returns the service-reported message on failure (also toasted).
    pub async fn sign_out(&self) -> Result<(), String> {
        let result = self.client.sign_out().await;
        match &result {
            Ok(()) => self.notify(
                "Logged out",
                "You have been successfully logged out.",
                ToastVariant::Info,
            ),
            Err(message) => self.notify("Sign Out Error", message, ToastVariant::Destructive),
        }
        result
    }

    fn notify(&self, title: &str, description: &str, variant: ToastVariant) {
        let _ = self.toasts.try_update(|toasts| {
            toasts.push(title, description, variant);
        });
    }
}

/// Fetch the profile row for `user_id` and store it, unless the
/// signed-in user changed while the lookup was in flight.
fn spawn_profile_fetch(state: RwSignal<AuthState>, user_id: String) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Some(profile) = crate::net::api::fetch_profile(&user_id).await {
            let _ = state.try_update(|st| {
                if st.user.as_ref().is_some_and(|user| user.id == user_id) {
                    st.profile = Some(profile);
                }
            });
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (state, user_id);
    }
}
