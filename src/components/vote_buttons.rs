//! Up/down vote controls for posts and comments.
//!
//! DESIGN
//! ======
//! Clicking the already-active direction removes the vote (direction 0).
//! The score updates from the server's acknowledgement, not optimistically.

#[cfg(test)]
#[path = "vote_buttons_test.rs"]
mod vote_buttons_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::types::VoteTarget;
use crate::state::session::SessionState;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionStore;

/// Direction to submit when `clicked` is pressed with `current` active.
fn next_direction(current: Option<i32>, clicked: i32) -> i32 {
    if current == Some(clicked) { 0 } else { clicked }
}

#[component]
pub fn VoteButtons(
    target: VoteTarget,
    score: i64,
    #[prop(optional_no_strip)] user_vote: Option<i32>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    #[cfg(feature = "hydrate")]
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let score = RwSignal::new(score);
    let vote = RwSignal::new(user_vote);
    let busy = RwSignal::new(false);

    let cast = move |clicked: i32| {
        if busy.get_untracked() {
            return;
        }
        if !session.get_untracked().is_signed_in() {
            navigate("/signin", leptos_router::NavigateOptions::default());
            return;
        }
        let direction = next_direction(vote.get_untracked(), clicked);

        #[cfg(feature = "hydrate")]
        {
            busy.set(true);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                #[allow(clippy::cast_possible_truncation)]
                match crate::net::api::cast_vote(&store, target, direction as i8).await {
                    Ok(outcome) => {
                        score.set(outcome.new_score);
                        vote.set(if direction == 0 { None } else { Some(direction) });
                    }
                    Err(crate::net::http::ApiError::Unauthenticated) => {
                        session.set(SessionState::default());
                        navigate("/signin", leptos_router::NavigateOptions::default());
                    }
                    Err(err) => leptos::logging::warn!("vote failed: {err}"),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (direction, target);
        }
    };

    let cast_up = cast.clone();
    let cast_down = cast;

    view! {
        <div class="vote">
            <button
                class="vote__up"
                class:vote__up--active=move || vote.get() == Some(1)
                on:click=move |_| cast_up(1)
            >
                "▲"
            </button>
            <span class="vote__score">{move || score.get()}</span>
            <button
                class="vote__down"
                class:vote__down--active=move || vote.get() == Some(-1)
                on:click=move |_| cast_down(-1)
            >
                "▼"
            </button>
        </div>
    }
}
