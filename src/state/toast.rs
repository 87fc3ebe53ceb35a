//! Notification queue backing the toast host.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth state holder pushes fire-and-forget notifications here; the
//! `ToastHost` component renders and dismisses them. Nothing consumes a
//! return value from the channel.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Info,
    Destructive,
}

/// A single on-screen notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Unique id (UUID string) used as the render key and dismiss handle.
    pub id: String,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

/// Queue of live notifications, newest last.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

impl ToastState {
    /// Append a notification and return its id.
    pub fn push(&mut self, title: &str, description: &str, variant: ToastVariant) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.toasts.push(Toast {
            id: id.clone(),
            title: title.to_owned(),
            description: description.to_owned(),
            variant,
        });
        id
    }

    /// Remove the notification with `id`, if it is still live.
    pub fn dismiss(&mut self, id: &str) {
        self.toasts.retain(|toast| toast.id != id);
    }
}
