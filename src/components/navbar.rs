//! Site navbar reflecting signed-in vs signed-out session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders purely from the reactive session context; sign-out is the one
//! place the navbar mutates the session (clear store, reset state, go home).

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::avatar::Avatar;
use crate::state::session::{SessionState, SessionStore};

fn profile_href(username: &str) -> String {
    format!("/profile/{username}")
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let on_sign_out = move |_| {
        store.clear();
        session.set(SessionState::default());
        navigate("/", NavigateOptions::default());
    };

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">"TrackWeave"</a>
            <div class="navbar__auth">
                <Show
                    when=move || session.get().is_signed_in()
                    fallback=|| {
                        view! {
                            <a class="navbar__link navbar__link--accent" href="/signin">
                                "Sign in"
                            </a>
                            <a class="navbar__cta" href="/register">"Create Account"</a>
                        }
                    }
                >
                    <a class="navbar__link" href="/">"Feed"</a>
                    {move || {
                        session.get().user.map(|user| {
                            let href = profile_href(&user.username);
                            let label = user.label().to_owned();
                            view! {
                                <a class="navbar__profile" href=href>
                                    <Avatar user=user size=30/>
                                    <span class="navbar__name">{label}</span>
                                </a>
                            }
                        })
                    }}
                    <button class="navbar__signout" on:click=on_sign_out.clone()>
                        "Sign out"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
