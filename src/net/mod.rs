//! Networking modules for the external-service boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth_client` wraps the managed identity service's REST gateway and
//! publishes session-change events, `api` handles application REST
//! calls (profile store), and `types` defines the shared wire schema.

pub mod api;
pub mod auth_client;
pub mod types;
