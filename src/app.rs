//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::pages::{
    feed::FeedPage, post::PostPage, profile::ProfilePage, register::RegisterPage,
    signin::SignInPage,
};
use crate::state::feed::FeedState;
use crate::state::session::{SessionState, SessionStore};

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
/// Provides the session store and shared state contexts, validates any
/// stored token against the server once per page load, and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = SessionStore;
    // Seed from the cached profile so the navbar is right immediately; the
    // bootstrap below reconciles against the server.
    let session = RwSignal::new(SessionState { user: store.cached_user(), loading: true });
    let feed = RwSignal::new(FeedState::default());

    provide_context(store);
    provide_context(session);
    provide_context(feed);

    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            let user = crate::state::session::bootstrap_with(&store, || async move {
                crate::net::api::me(&store).await
            })
            .await;
            session.set(SessionState { user, loading: false });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        session.update(|state| state.loading = false);
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/trackweave.css"/>
        <Title text="TrackWeave"/>

        <Router>
            <Navbar/>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=FeedPage/>
                    <Route path=StaticSegment("signin") view=SignInPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=(StaticSegment("post"), ParamSegment("id")) view=PostPage/>
                    <Route
                        path=(StaticSegment("profile"), ParamSegment("username"))
                        view=ProfilePage
                    />
                </Routes>
            </main>
        </Router>
    }
}
