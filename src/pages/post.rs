//! Post detail page: full post, vote controls, author actions, comments.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::avatar::Avatar;
use crate::components::comment_thread::CommentThread;
use crate::components::vote_buttons::VoteButtons;
use crate::net::types::{Comment, Post, VoteTarget};
use crate::state::feed::FeedState;
use crate::state::session::SessionState;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionStore;
use crate::util::markdown;
use crate::util::time_ago::time_ago;

#[component]
pub fn PostPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let feed = expect_context::<RwSignal<FeedState>>();
    #[cfg(feature = "hydrate")]
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();
    let params = use_params_map();
    let route_id = move || {
        params
            .read()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
    };

    let post = RwSignal::new(None::<Post>);
    let comments = RwSignal::new(Vec::<Comment>::new());
    let error = RwSignal::new(None::<String>);
    let editing = RwSignal::new(false);
    let title_draft = RwSignal::new(String::new());
    let body_draft = RwSignal::new(String::new());
    let notice = RwSignal::new(String::new());

    let load_comments = move |id: i64| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::api::comments_for_post(&store, id).await {
                    Ok(thread) => comments.set(thread),
                    Err(err) => leptos::logging::warn!("comment load failed: {err}"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, &comments);
        }
    };

    // Load post and thread whenever the route id changes.
    let loaded_id = RwSignal::new(None::<i64>);
    Effect::new(move || {
        let Some(id) = route_id() else {
            return;
        };
        if loaded_id.get_untracked() == Some(id) {
            return;
        }
        loaded_id.set(Some(id));
        editing.set(false);
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::api::get_post(&store, id).await {
                    Ok(loaded) => post.set(Some(loaded)),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        }
        load_comments(id);
    });

    let on_comments_changed = Callback::new(move |()| {
        if let Some(id) = loaded_id.get_untracked() {
            load_comments(id);
        }
    });

    let is_own = move || {
        let viewer = session.get().user;
        let author = post.get().map(|p| p.author.id);
        viewer.zip(author).is_some_and(|(user, id)| user.id == id)
    };

    let start_edit = move |_| {
        if let Some(current) = post.get_untracked() {
            title_draft.set(current.title.clone());
            body_draft.set(current.body.clone().unwrap_or_default());
            editing.set(true);
        }
    };

    let on_save = move |_| {
        let title = title_draft.get_untracked().trim().to_owned();
        if title.is_empty() {
            notice.set("Give your post a title.".to_owned());
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let Some(id) = loaded_id.get_untracked() else {
                    return;
                };
                let body = body_draft.get_untracked().trim().to_owned();
                let body_field = (!body.is_empty()).then_some(body.as_str());
                match crate::net::api::update_post(&store, id, Some(&title), body_field).await {
                    Ok(updated) => {
                        post.set(Some(updated));
                        editing.set(false);
                        notice.set(String::new());
                    }
                    Err(err) => notice.set(err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = title;
        }
    };

    let nav_delete = navigate.clone();
    let on_delete = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let navigate = nav_delete.clone();
            leptos::task::spawn_local(async move {
                let Some(id) = loaded_id.get_untracked() else {
                    return;
                };
                match crate::net::api::delete_post(&store, id).await {
                    Ok(()) => {
                        feed.update(|f| f.posts.retain(|p| p.id != id));
                        navigate("/", leptos_router::NavigateOptions::default());
                    }
                    Err(crate::net::http::ApiError::Unauthenticated) => {
                        session.set(SessionState::default());
                        navigate("/signin", leptos_router::NavigateOptions::default());
                    }
                    Err(err) => notice.set(err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&nav_delete, &feed);
        }
    };

    view! {
        <div class="post-page">
            <Show when=move || error.get().is_some()>
                <p class="post-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                post.get().map(|current| {
                    // Clone handlers per render so the reactive block stays `FnMut`;
                    // the inner `move` closures (Show children, fallbacks) consume
                    // these locals instead of moving the captured originals out.
                    let is_own = is_own.clone();
                    let start_edit = start_edit.clone();
                    let on_save = on_save.clone();
                    let on_delete = on_delete.clone();
                    let post_id = current.id;
                    let score = current.score;
                    let user_vote = current.user_vote;
                    let title = current.title;
                    let link_url = current.link_url;
                    let author = current.author;
                    let author_label = author.label().to_owned();
                    let author_href = format!("/profile/{}", author.username);
                    let created = time_ago(&current.created_at);
                    let body_html = current.body.as_deref().map(markdown::render);
                    view! {
                        <article class="post-page__post">
                            <VoteButtons
                                target=VoteTarget::Post(post_id)
                                score=score
                                user_vote=user_vote
                            />
                            <div class="post-page__main">
                                <Show
                                    when=move || !editing.get()
                                    fallback=move || {
                                        view! {
                                            <input
                                                class="post-page__edit-title"
                                                type="text"
                                                prop:value=move || title_draft.get()
                                                on:input=move |ev| {
                                                    title_draft.set(event_target_value(&ev));
                                                }
                                            />
                                            <textarea
                                                class="post-page__edit-body"
                                                prop:value=move || body_draft.get()
                                                on:input=move |ev| {
                                                    body_draft.set(event_target_value(&ev));
                                                }
                                            ></textarea>
                                            <div class="post-page__edit-actions">
                                                <button class="btn btn--primary" on:click=on_save.clone()>
                                                    "Save"
                                                </button>
                                                <button
                                                    class="btn"
                                                    on:click=move |_| editing.set(false)
                                                >
                                                    "Cancel"
                                                </button>
                                            </div>
                                        }
                                    }
                                >
                                    <h1 class="post-page__title">{title.clone()}</h1>
                                    {link_url.clone().map(|url| {
                                        view! {
                                            <a
                                                class="post-page__link"
                                                href=url.clone()
                                                target="_blank"
                                                rel="noopener"
                                            >
                                                {url.clone()}
                                            </a>
                                        }
                                    })}
                                    {body_html.clone().map(|html| {
                                        view! {
                                            <div class="post-page__body" inner_html=html></div>
                                        }
                                    })}
                                </Show>
                                <div class="post-page__meta">
                                    <a class="post-page__author" href=author_href>
                                        <Avatar user=author size=24/>
                                        <span>{author_label}</span>
                                    </a>
                                    <span class="post-page__time">{created}</span>
                                    <Show when=is_own>
                                        <button class="post-page__action" on:click=start_edit.clone()>
                                            "Edit"
                                        </button>
                                        <button
                                            class="post-page__action"
                                            on:click=on_delete.clone()
                                        >
                                            "Delete"
                                        </button>
                                    </Show>
                                </div>
                                <Show when=move || !notice.get().is_empty()>
                                    <p class="post-page__notice">{move || notice.get()}</p>
                                </Show>
                            </div>
                        </article>
                    }
                })
            }}
            {move || {
                route_id().map(|id| {
                    view! {
                        <CommentThread
                            post_id=id
                            comments=comments.get()
                            on_changed=on_comments_changed
                        />
                    }
                })
            }}
        </div>
    }
}
