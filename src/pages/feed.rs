//! Home feed: paginated post list with sort switch and a composer.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route for signed-in and signed-out visitors alike;
//! it reads the shared feed state so returning to the feed keeps scroll-back
//! inventory loaded.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::post_card::PostCard;
use crate::net::types::SortMode;
use crate::state::feed::FeedState;
use crate::state::session::SessionState;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionStore;

/// Title length cap enforced client-side; mirrors the backend limit.
const MAX_TITLE_LEN: usize = 300;

fn validate_post_title(raw: &str) -> Result<String, &'static str> {
    let title = raw.trim();
    if title.is_empty() {
        return Err("Give your post a title.");
    }
    if title.len() > MAX_TITLE_LEN {
        return Err("Title is too long.");
    }
    Ok(title.to_owned())
}

fn validate_link_url(raw: &str) -> Result<Option<String>, &'static str> {
    let url = raw.trim();
    if url.is_empty() {
        return Ok(None);
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(Some(url.to_owned()))
    } else {
        Err("Links must start with http:// or https://.")
    }
}

#[component]
pub fn FeedPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let feed = expect_context::<RwSignal<FeedState>>();
    #[cfg(feature = "hydrate")]
    let store = expect_context::<SessionStore>();

    // Fetch one page; restarting switches sort and clears the list first.
    let load = move |restart: bool, sort: SortMode| {
        #[cfg(feature = "hydrate")]
        {
            if restart {
                feed.update(|f| f.restart(sort));
            } else {
                feed.update(|f| f.loading = true);
            }
            leptos::task::spawn_local(async move {
                let skip = feed.get_untracked().skip;
                match crate::net::api::list_posts(&store, skip, sort).await {
                    Ok(page) => feed.update(|f| f.absorb_page(page)),
                    Err(err) => feed.update(|f| f.fail(err.to_string())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (restart, sort, &feed);
        }
    };

    // Load the first page once per mount unless an earlier visit filled it.
    let requested = RwSignal::new(false);
    let load_initial = load.clone();
    Effect::new(move || {
        if requested.get() {
            return;
        }
        requested.set(true);
        if feed.get_untracked().posts.is_empty() {
            load_initial(true, feed.get_untracked().sort);
        }
    });

    let load_new = load.clone();
    let load_top = load.clone();
    let load_more = load;

    view! {
        <div class="feed-page">
            <Show when=move || session.get().is_signed_in()>
                <PostComposer/>
            </Show>
            <div class="feed-page__sort">
                <button
                    class="feed-page__sort-button"
                    class:feed-page__sort-button--active=move || feed.get().sort == SortMode::New
                    on:click=move |_| load_new(true, SortMode::New)
                >
                    "New"
                </button>
                <button
                    class="feed-page__sort-button"
                    class:feed-page__sort-button--active=move || feed.get().sort == SortMode::Top
                    on:click=move |_| load_top(true, SortMode::Top)
                >
                    "Top"
                </button>
            </div>
            <Show when=move || feed.get().error.is_some()>
                <p class="feed-page__error">{move || feed.get().error.unwrap_or_default()}</p>
            </Show>
            <div class="feed-page__list">
                <For
                    each=move || feed.get().posts
                    key=|post| post.id
                    children=|post| view! { <PostCard post=post/> }
                />
            </div>
            <Show when=move || feed.get().loading>
                <p class="feed-page__loading">"Loading..."</p>
            </Show>
            <Show when=move || feed.get().more_available>
                <button
                    class="feed-page__more"
                    disabled=move || feed.get().loading
                    on:click=move |_| load_more(false, feed.get_untracked().sort)
                >
                    "Load more"
                </button>
            </Show>
        </div>
    }
}

/// Inline composer shown to signed-in users at the top of the feed.
#[component]
fn PostComposer() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let feed = expect_context::<RwSignal<FeedState>>();
    #[cfg(feature = "hydrate")]
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let title = RwSignal::new(String::new());
    let link = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let notice = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let checked = validate_post_title(&title.get())
            .and_then(|title_value| Ok((title_value, validate_link_url(&link.get())?)));
        let (title_value, link_value) = match checked {
            Ok(values) => values,
            Err(message) => {
                notice.set(message.to_owned());
                return;
            }
        };
        let body_value = body.get().trim().to_owned();
        busy.set(true);
        notice.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let body_field = (!body_value.is_empty()).then_some(body_value.as_str());
                let result = crate::net::api::create_post(
                    &store,
                    &title_value,
                    body_field,
                    link_value.as_deref(),
                )
                .await;
                match result {
                    Ok(post) => {
                        feed.update(|f| f.posts.insert(0, post));
                        title.set(String::new());
                        link.set(String::new());
                        body.set(String::new());
                    }
                    Err(crate::net::http::ApiError::Unauthenticated) => {
                        session.set(SessionState::default());
                        navigate("/signin", leptos_router::NavigateOptions::default());
                    }
                    Err(err) => notice.set(err.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (title_value, link_value, body_value, &session, &feed, &navigate);
            busy.set(false);
        }
    };

    view! {
        <form class="post-composer" on:submit=on_submit>
            <input
                class="post-composer__title"
                type="text"
                placeholder="Title"
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            />
            <input
                class="post-composer__link"
                type="text"
                placeholder="Link (optional)"
                prop:value=move || link.get()
                on:input=move |ev| link.set(event_target_value(&ev))
            />
            <textarea
                class="post-composer__body"
                placeholder="Text (optional, markdown supported)"
                prop:value=move || body.get()
                on:input=move |ev| body.set(event_target_value(&ev))
            ></textarea>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                "Post"
            </button>
            <Show when=move || !notice.get().is_empty()>
                <p class="post-composer__notice">{move || notice.get()}</p>
            </Show>
        </form>
    }
}
