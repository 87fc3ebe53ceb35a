//! Landing page: the default post-authentication navigation target.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthContext;

/// Home page — greets the signed-in farmer and offers sign-out.
/// Redirects to `/login` if the user is not authenticated.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let state = auth.state;

    // Redirect to login once auth has loaded with no user.
    Effect::new(move || {
        let state = state.get();
        if !state.loading && state.user.is_none() {
            navigate("/login", NavigateOptions::default());
        }
    });

    let greeting = move || {
        let state = state.get();
        state
            .profile
            .as_ref()
            .and_then(|profile| profile.full_name.clone())
            .or_else(|| state.user.as_ref().map(|user| user.display_name()))
            .unwrap_or_default()
    };

    let district = move || {
        state
            .get()
            .profile
            .as_ref()
            .and_then(|profile| profile.district.clone())
    };

    let on_sign_out = move |_ev: leptos::ev::MouseEvent| {
        let auth = auth.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(message) = auth.sign_out().await {
                leptos::logging::warn!("sign-out failed: {message}");
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = auth;
        }
    };

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1>"Krishi"</h1>
                <button class="btn" on:click=on_sign_out>"Sign Out"</button>
            </header>
            <main class="home-page__content">
                <Show when=move || !state.get().loading fallback=|| view! { <p>"Loading..."</p> }>
                    <h2>{move || format!("Namaste, {}!", greeting())}</h2>
                    <Show when=move || district().is_some()>
                        <p class="home-page__district">
                            {move || district().unwrap_or_default()}
                        </p>
                    </Show>
                    <p class="home-page__hint">"Your mandi prices and listings will appear here."</p>
                </Show>
            </main>
        </div>
    }
}
