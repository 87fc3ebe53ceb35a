//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome while reading/writing state from
//! Leptos context providers.

pub mod toast;
