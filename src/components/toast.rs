//! Toast host rendering the shared notification queue.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastState, ToastVariant};

/// How long a toast stays on screen before auto-dismissing.
#[cfg(feature = "hydrate")]
const TOAST_LIFETIME: std::time::Duration = std::time::Duration::from_secs(5);

/// Fixed-position stack of live notifications.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id.clone()
                children=move |toast: Toast| view! { <ToastCard toast/> }
            />
        </div>
    }
}

/// A single notification with a dismiss button and an auto-dismiss
/// timer (browser only).
#[component]
fn ToastCard(toast: Toast) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let Toast { id, title, description, variant } = toast;

    #[cfg(feature = "hydrate")]
    {
        let id = id.clone();
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(TOAST_LIFETIME).await;
            let _ = toasts.try_update(|state| state.dismiss(&id));
        });
    }

    let class = match variant {
        ToastVariant::Info => "toast",
        ToastVariant::Destructive => "toast toast--destructive",
    };

    view! {
        <div class=class role="status">
            <div class="toast__body">
                <p class="toast__title">{title}</p>
                <p class="toast__description">{description}</p>
            </div>
            <button class="toast__close" on:click=move |_| toasts.update(|state| state.dismiss(&id))>
                "Dismiss"
            </button>
        </div>
    }
}
