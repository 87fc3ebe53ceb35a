//! Root application component with routing, shared contexts, and the
//! authentication holder lifecycle.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast::ToastHost;
use crate::pages::{home::HomePage, login::LoginPage};
use crate::state::auth::AuthContext;
use crate::state::toast::ToastState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the toast queue and the authentication holder, attaches the
/// session-change listener before the initial session fetch, and tears
/// the subscription down on unmount.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    provide_context(toasts);

    let auth = AuthContext::new(toasts);
    provide_context(auth.clone());

    let subscription = StoredValue::new(Some(auth.init()));
    on_cleanup(move || {
        if let Some(subscription) = subscription.try_update_value(Option::take).flatten() {
            subscription.unsubscribe();
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/krishi-client.css"/>
        <Title text="Krishi"/>

        <Router>
            <ToastHost/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
    }
}
