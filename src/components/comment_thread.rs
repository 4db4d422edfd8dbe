//! Nested comment thread with composer, reply, edit, and delete actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The post page owns the comment list; every mutation here reports back
//! through `on_changed` so the page refetches the thread instead of this
//! component patching the tree locally.

#[cfg(test)]
#[path = "comment_thread_test.rs"]
mod comment_thread_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::avatar::Avatar;
use crate::components::vote_buttons::VoteButtons;
use crate::net::types::{Comment, VoteTarget};
use crate::state::session::SessionState;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionStore;
use crate::util::markdown;
use crate::util::time_ago::time_ago;

/// Comment length cap enforced client-side; mirrors the backend limit.
const MAX_COMMENT_LEN: usize = 10_000;

fn validate_comment_body(raw: &str) -> Result<String, &'static str> {
    let body = raw.trim();
    if body.is_empty() {
        return Err("Write something first.");
    }
    if body.len() > MAX_COMMENT_LEN {
        return Err("Comment is too long.");
    }
    Ok(body.to_owned())
}

#[component]
pub fn CommentThread(
    post_id: i64,
    comments: Vec<Comment>,
    on_changed: Callback<()>,
) -> impl IntoView {
    view! {
        <section class="comments">
            <CommentComposer post_id=post_id on_done=on_changed/>
            <div class="comments__list">
                {comments
                    .into_iter()
                    .map(|comment| comment_node(comment, 0, on_changed))
                    .collect_view()}
            </div>
        </section>
    }
}

/// Recursive node renderer; recursion forces the erased view type.
fn comment_node(mut comment: Comment, depth: usize, on_changed: Callback<()>) -> AnyView {
    let replies = std::mem::take(&mut comment.replies);
    let children = replies
        .into_iter()
        .map(|reply| comment_node(reply, depth + 1, on_changed))
        .collect_view();
    view! {
        <div class=format!("comment comment--depth-{}", depth.min(6))>
            <CommentItem comment=comment on_changed=on_changed/>
            <div class="comment__replies">{children}</div>
        </div>
    }
    .into_any()
}

#[component]
fn CommentItem(comment: Comment, on_changed: Callback<()>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    #[cfg(feature = "hydrate")]
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let replying = RwSignal::new(false);
    let editing = RwSignal::new(false);
    let edit_draft = RwSignal::new(comment.body.clone());
    let notice = RwSignal::new(String::new());

    let comment_id = comment.id;
    let post_id = comment.post_id;
    let author_id = comment.author.id;
    let is_own = move || {
        session
            .get()
            .user
            .as_ref()
            .is_some_and(|user| user.id == author_id)
    };

    let body_html = markdown::render(&comment.body);
    let author = comment.author.clone();
    let author_label = author.label().to_owned();
    let created = time_ago(&comment.created_at);

    let on_reply_done = Callback::new(move |()| {
        replying.set(false);
        on_changed.run(());
    });

    let nav_delete = navigate.clone();
    let on_delete = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let navigate = nav_delete.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::delete_comment(&store, comment_id).await {
                    Ok(()) => on_changed.run(()),
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
            let _ = &nav_delete;
        }
    };

    let nav_save = navigate.clone();
    let on_save_edit = move |_| {
        let body = match validate_comment_body(&edit_draft.get_untracked()) {
            Ok(body) => body,
            Err(message) => {
                notice.set(message.to_owned());
                return;
            }
        };
        #[cfg(feature = "hydrate")]
        {
            let navigate = nav_save.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::update_comment(&store, comment_id, &body).await {
                    Ok(_) => {
                        editing.set(false);
                        on_changed.run(());
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
            let _ = (body, &nav_save);
        }
    };

    view! {
        <div class="comment__item">
            <div class="comment__meta">
                <Avatar user=author size=20/>
                <span class="comment__author">{author_label}</span>
                <span class="comment__time">{created}</span>
            </div>
            <Show
                when=move || !editing.get()
                fallback=move || {
                    view! {
                        <textarea
                            class="comment__edit"
                            prop:value=move || edit_draft.get()
                            on:input=move |ev| edit_draft.set(event_target_value(&ev))
                        ></textarea>
                        <div class="comment__edit-actions">
                            <button class="btn btn--primary" on:click=on_save_edit.clone()>
                                "Save"
                            </button>
                            <button class="btn" on:click=move |_| editing.set(false)>
                                "Cancel"
                            </button>
                        </div>
                    }
                }
            >
                <div class="comment__body" inner_html=body_html.clone()></div>
            </Show>
            <div class="comment__actions">
                <VoteButtons
                    target=VoteTarget::Comment(comment_id)
                    score=comment.score
                    user_vote=comment.user_vote
                />
                <button class="comment__action" on:click=move |_| replying.update(|r| *r = !*r)>
                    "Reply"
                </button>
                <Show when=is_own>
                    <button class="comment__action" on:click=move |_| editing.set(true)>
                        "Edit"
                    </button>
                    <button class="comment__action" on:click=on_delete.clone()>"Delete"</button>
                </Show>
            </div>
            <Show when=move || !notice.get().is_empty()>
                <p class="comment__notice">{move || notice.get()}</p>
            </Show>
            <Show when=move || replying.get()>
                <CommentComposer post_id=post_id parent_id=Some(comment_id) on_done=on_reply_done/>
            </Show>
        </div>
    }
}

#[component]
pub fn CommentComposer(
    post_id: i64,
    #[prop(optional_no_strip)] parent_id: Option<i64>,
    on_done: Callback<()>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    #[cfg(feature = "hydrate")]
    let store = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let draft = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let notice = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        if !session.get_untracked().is_signed_in() {
            navigate("/signin", leptos_router::NavigateOptions::default());
            return;
        }
        let body = match validate_comment_body(&draft.get_untracked()) {
            Ok(body) => body,
            Err(message) => {
                notice.set(message.to_owned());
                return;
            }
        };
        #[cfg(feature = "hydrate")]
        {
            busy.set(true);
            notice.set(String::new());
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::create_comment(&store, post_id, &body, parent_id).await {
                    Ok(_) => {
                        draft.set(String::new());
                        on_done.run(());
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
            let _ = (body, post_id, parent_id, &on_done);
        }
    };

    view! {
        <form class="comment-composer" on:submit=on_submit>
            <textarea
                class="comment-composer__input"
                placeholder="Add a comment"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            ></textarea>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                "Comment"
            </button>
            <Show when=move || !notice.get().is_empty()>
                <p class="comment-composer__notice">{move || notice.get()}</p>
            </Show>
        </form>
    }
}
