//! Profile page: user header, their posts, and self-service editing.
//!
//! SYSTEM CONTEXT
//! ==============
//! Viewing someone else's profile is read-only; the viewer's own profile
//! adds display-name/bio editing and avatar upload.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::avatar::Avatar;
use crate::components::post_card::PostCard;
use crate::net::types::{Post, User};
#[cfg(feature = "hydrate")]
use crate::state::feed::FEED_PAGE_SIZE;
use crate::state::session::SessionState;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionStore;
use crate::util::markdown;
use crate::util::time_ago::time_ago;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    #[cfg(feature = "hydrate")]
    let store = expect_context::<SessionStore>();
    let params = use_params_map();
    let route_username = move || params.read().get("username");

    let profile = RwSignal::new(None::<User>);
    let posts = RwSignal::new(Vec::<Post>::new());
    let more_available = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let editing = RwSignal::new(false);
    let name_draft = RwSignal::new(String::new());
    let bio_draft = RwSignal::new(String::new());
    let notice = RwSignal::new(String::new());

    let load_posts = move |username: String, skip: u32| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::api::user_posts(&store, &username, skip).await {
                    Ok(page) => {
                        more_available
                            .set(u32::try_from(page.len()).unwrap_or(u32::MAX) >= FEED_PAGE_SIZE);
                        if skip == 0 {
                            posts.set(page);
                        } else {
                            posts.update(|list| list.extend(page));
                        }
                    }
                    Err(err) => leptos::logging::warn!("post list failed: {err}"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, skip, &posts, &more_available);
        }
    };

    // Load profile and posts whenever the route username changes.
    let loaded_username = RwSignal::new(None::<String>);
    Effect::new(move || {
        let Some(username) = route_username() else {
            return;
        };
        if loaded_username.get_untracked().as_deref() == Some(username.as_str()) {
            return;
        }
        loaded_username.set(Some(username.clone()));
        editing.set(false);
        error.set(None);
        #[cfg(feature = "hydrate")]
        {
            let username = username.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::get_profile(&store, &username).await {
                    Ok(user) => profile.set(Some(user)),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        }
        load_posts(username, 0);
    });

    let is_own = move || {
        let viewer = session.get().user;
        let shown = route_username();
        viewer
            .zip(shown)
            .is_some_and(|(user, username)| user.username == username)
    };

    let start_edit = move |_| {
        if let Some(current) = profile.get_untracked() {
            name_draft.set(current.display_name.clone().unwrap_or_default());
            bio_draft.set(current.bio.clone().unwrap_or_default());
            editing.set(true);
        }
    };

    let on_save = move |_| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let name = name_draft.get_untracked().trim().to_owned();
                let bio = bio_draft.get_untracked().trim().to_owned();
                let result = crate::net::api::update_profile(
                    &store,
                    Some(name.as_str()),
                    Some(bio.as_str()),
                )
                .await;
                match result {
                    Ok(user) => {
                        store.save_user(&user);
                        session.set(SessionState { user: Some(user.clone()), loading: false });
                        profile.set(Some(user));
                        editing.set(false);
                        notice.set(String::new());
                    }
                    Err(err) => notice.set(err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &notice);
        }
    };

    let on_avatar_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let Some(file) = event_target::<web_sys::HtmlInputElement>(&ev)
                .files()
                .and_then(|files| files.get(0))
            else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::net::api::upload_avatar(&store, &file).await {
                    Ok(user) => {
                        store.save_user(&user);
                        session.set(SessionState { user: Some(user.clone()), loading: false });
                        profile.set(Some(user));
                        notice.set(String::new());
                    }
                    Err(err) => notice.set(err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, &session, &notice);
        }
    };

    let on_load_more = move |_| {
        if let Some(username) = loaded_username.get_untracked() {
            let skip = u32::try_from(posts.with_untracked(Vec::len)).unwrap_or(u32::MAX);
            load_posts(username, skip);
        }
    };

    view! {
        <div class="profile-page">
            <Show when=move || error.get().is_some()>
                <p class="profile-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                profile.get().map(|user| {
                    let label = user.label().to_owned();
                    let username = user.username.clone();
                    let joined = time_ago(&user.created_at);
                    let bio_html = user.bio.as_deref().map(markdown::render);
                    view! {
                        <header class="profile-page__header">
                            <Avatar user=user size=72/>
                            <div class="profile-page__identity">
                                <h1 class="profile-page__name">{label}</h1>
                                <span class="profile-page__username">{format!("@{username}")}</span>
                                <span class="profile-page__joined">{format!("joined {joined}")}</span>
                            </div>
                            <Show when=is_own>
                                <button class="btn" on:click=start_edit>"Edit profile"</button>
                            </Show>
                        </header>
                        {bio_html.map(|html| {
                            view! { <div class="profile-page__bio" inner_html=html></div> }
                        })}
                    }
                })
            }}
            <Show when=move || editing.get()>
                <div class="profile-page__edit">
                    <input
                        class="profile-page__edit-name"
                        type="text"
                        placeholder="display name"
                        prop:value=move || name_draft.get()
                        on:input=move |ev| name_draft.set(event_target_value(&ev))
                    />
                    <textarea
                        class="profile-page__edit-bio"
                        placeholder="bio"
                        prop:value=move || bio_draft.get()
                        on:input=move |ev| bio_draft.set(event_target_value(&ev))
                    ></textarea>
                    <label class="profile-page__avatar-upload">
                        "Avatar"
                        <input type="file" accept="image/*" on:change=on_avatar_change/>
                    </label>
                    <div class="profile-page__edit-actions">
                        <button class="btn btn--primary" on:click=on_save>"Save"</button>
                        <button class="btn" on:click=move |_| editing.set(false)>"Cancel"</button>
                    </div>
                    <Show when=move || !notice.get().is_empty()>
                        <p class="profile-page__notice">{move || notice.get()}</p>
                    </Show>
                </div>
            </Show>
            <section class="profile-page__posts">
                <For
                    each=move || posts.get()
                    key=|post| post.id
                    children=|post| view! { <PostCard post=post/> }
                />
            </section>
            <Show when=move || more_available.get()>
                <button class="profile-page__more" on:click=on_load_more>"Load more"</button>
            </Show>
        </div>
    }
}
