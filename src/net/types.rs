//! Shared wire DTOs for the identity-service and profile-store boundary.
//!
//! DESIGN
//! ======
//! These types mirror the managed identity service's token-bundle
//! payloads so serde round-trips stay lossless and the auth client can
//! remain schema-driven.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A session token bundle as issued by the identity service.
///
/// Replaced wholesale on every session-change event; never mutated
/// field-by-field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token presented on authorized calls.
    pub access_token: String,
    /// Token scheme; the service issues `"bearer"`.
    pub token_type: String,
    /// Access-token lifetime in seconds, if reported.
    pub expires_in: Option<i64>,
    /// Absolute expiry as seconds since the Unix epoch, if reported.
    pub expires_at: Option<i64>,
    /// Token the service accepts to mint a replacement session.
    pub refresh_token: Option<String>,
    /// Identity record embedded in the bundle.
    pub user: User,
}

impl Session {
    /// Whether the bundle is past its absolute expiry at `now_secs`.
    ///
    /// Bundles without an `expires_at` are treated as live; the service
    /// is the authority and will reject a stale token on use.
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        matches!(self.expires_at, Some(at) if at <= now_secs)
    }
}

/// An authenticated user as embedded in a [`Session`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Email address, when the account was registered by email.
    pub email: Option<String>,
    /// E.164 phone number, when the account was registered by phone.
    pub phone: Option<String>,
    /// Free-form metadata captured at registration (display name).
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl User {
    /// Best display label: metadata name, then phone, then email.
    pub fn display_name(&self) -> String {
        self.user_metadata
            .full_name
            .clone()
            .or_else(|| self.phone.clone())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Farmer".to_owned())
    }
}

/// Registration metadata stored alongside the identity record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Display name supplied at sign-up.
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Application profile row, keyed by the identity-service user id.
///
/// Fetched separately from the session; may briefly lag behind the
/// signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity-service user id this row belongs to.
    pub id: String,
    /// Display name, if the profile has been filled in.
    pub full_name: Option<String>,
    /// Contact phone in E.164 form.
    pub phone: Option<String>,
    /// District the farmer operates in.
    pub district: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: Option<String>,
}
