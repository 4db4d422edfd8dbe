//! Endpoint façade for the TrackWeave REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! A fixed catalog of named operations, each a thin shape over the shared
//! executor in [`crate::net::http`]: method, path, and payload. Avatar
//! upload is a multipart payload through the same executor, so it shares
//! the refresh/retry semantics of every other call.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{self, ApiError, HttpMethod, Payload};
use super::types::{Comment, Post, SortMode, TokenPair, User, VoteOutcome, VoteTarget};
use crate::state::session::SessionStore;

fn user_endpoint(username: &str) -> String {
    format!("/users/{username}")
}

fn user_posts_endpoint(username: &str, skip: u32) -> String {
    format!("/users/{username}/posts?skip={skip}")
}

fn posts_endpoint(skip: u32, sort: SortMode) -> String {
    format!("/posts/?skip={skip}&sort={}", sort.as_query())
}

fn post_endpoint(id: i64) -> String {
    format!("/posts/{id}")
}

fn post_comments_endpoint(post_id: i64) -> String {
    format!("/comments/post/{post_id}")
}

fn comment_endpoint(id: i64) -> String {
    format!("/comments/{id}")
}

/// Vote body: direction plus exactly one target id.
fn vote_payload(target: VoteTarget, direction: i8) -> serde_json::Value {
    match target {
        VoteTarget::Post(id) => serde_json::json!({ "direction": direction, "post_id": id }),
        VoteTarget::Comment(id) => serde_json::json!({ "direction": direction, "comment_id": id }),
    }
}

/// Partial-update body with only the provided fields, so omitted fields are
/// left untouched server-side.
fn patch_payload(fields: &[(&str, Option<&str>)]) -> serde_json::Value {
    let mut patch = serde_json::Map::new();
    for (key, value) in fields {
        if let Some(value) = value {
            patch.insert((*key).to_owned(), serde_json::Value::from(*value));
        }
    }
    serde_json::Value::Object(patch)
}

// ── Auth ─────────────────────────────────────────────────────────────────

/// Create an account via `POST /auth/register` and receive a token pair.
pub async fn register(
    session: &SessionStore,
    username: &str,
    email: &str,
    password: &str,
    display_name: Option<&str>,
) -> Result<TokenPair, ApiError> {
    let payload = serde_json::json!({
        "username": username,
        "email": email,
        "password": password,
        "display_name": display_name,
    });
    http::request_json(session, HttpMethod::Post, "/auth/register", Payload::Json(payload)).await
}

/// Sign in via `POST /auth/login`. `identifier` is an email or a username.
pub async fn login(
    session: &SessionStore,
    identifier: &str,
    password: &str,
) -> Result<TokenPair, ApiError> {
    let payload = serde_json::json!({ "identifier": identifier, "password": password });
    http::request_json(session, HttpMethod::Post, "/auth/login", Payload::Json(payload)).await
}

/// Fetch the authenticated user via `GET /auth/me`.
pub async fn me(session: &SessionStore) -> Result<User, ApiError> {
    http::request_json(session, HttpMethod::Get, "/auth/me", Payload::Empty).await
}

// ── Users ────────────────────────────────────────────────────────────────

pub async fn get_profile(session: &SessionStore, username: &str) -> Result<User, ApiError> {
    http::request_json(session, HttpMethod::Get, &user_endpoint(username), Payload::Empty).await
}

/// Update the signed-in user's profile via `PATCH /users/me`.
pub async fn update_profile(
    session: &SessionStore,
    display_name: Option<&str>,
    bio: Option<&str>,
) -> Result<User, ApiError> {
    let payload = patch_payload(&[("display_name", display_name), ("bio", bio)]);
    http::request_json(session, HttpMethod::Patch, "/users/me", Payload::Json(payload)).await
}

/// Upload a new avatar via `POST /users/me/avatar` (multipart field `file`).
#[cfg(feature = "hydrate")]
pub async fn upload_avatar(session: &SessionStore, file: &web_sys::File) -> Result<User, ApiError> {
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::Network("could not build form data".to_owned()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Network("could not attach file".to_owned()))?;
    http::request_json(session, HttpMethod::Post, "/users/me/avatar", Payload::Form(form)).await
}

pub async fn user_posts(
    session: &SessionStore,
    username: &str,
    skip: u32,
) -> Result<Vec<Post>, ApiError> {
    http::request_json(
        session,
        HttpMethod::Get,
        &user_posts_endpoint(username, skip),
        Payload::Empty,
    )
    .await
}

// ── Posts ────────────────────────────────────────────────────────────────

pub async fn list_posts(
    session: &SessionStore,
    skip: u32,
    sort: SortMode,
) -> Result<Vec<Post>, ApiError> {
    http::request_json(session, HttpMethod::Get, &posts_endpoint(skip, sort), Payload::Empty).await
}

pub async fn get_post(session: &SessionStore, id: i64) -> Result<Post, ApiError> {
    http::request_json(session, HttpMethod::Get, &post_endpoint(id), Payload::Empty).await
}

pub async fn create_post(
    session: &SessionStore,
    title: &str,
    body: Option<&str>,
    link_url: Option<&str>,
) -> Result<Post, ApiError> {
    let payload = serde_json::json!({ "title": title, "body": body, "link_url": link_url });
    http::request_json(session, HttpMethod::Post, "/posts/", Payload::Json(payload)).await
}

pub async fn update_post(
    session: &SessionStore,
    id: i64,
    title: Option<&str>,
    body: Option<&str>,
) -> Result<Post, ApiError> {
    let payload = patch_payload(&[("title", title), ("body", body)]);
    http::request_json(session, HttpMethod::Patch, &post_endpoint(id), Payload::Json(payload)).await
}

pub async fn delete_post(session: &SessionStore, id: i64) -> Result<(), ApiError> {
    http::request_no_content(session, HttpMethod::Delete, &post_endpoint(id), Payload::Empty).await
}

// ── Comments ─────────────────────────────────────────────────────────────

pub async fn comments_for_post(
    session: &SessionStore,
    post_id: i64,
) -> Result<Vec<Comment>, ApiError> {
    http::request_json(
        session,
        HttpMethod::Get,
        &post_comments_endpoint(post_id),
        Payload::Empty,
    )
    .await
}

pub async fn create_comment(
    session: &SessionStore,
    post_id: i64,
    body: &str,
    parent_id: Option<i64>,
) -> Result<Comment, ApiError> {
    let payload = serde_json::json!({ "body": body, "parent_id": parent_id });
    http::request_json(
        session,
        HttpMethod::Post,
        &post_comments_endpoint(post_id),
        Payload::Json(payload),
    )
    .await
}

pub async fn update_comment(
    session: &SessionStore,
    id: i64,
    body: &str,
) -> Result<Comment, ApiError> {
    let payload = serde_json::json!({ "body": body });
    http::request_json(session, HttpMethod::Patch, &comment_endpoint(id), Payload::Json(payload))
        .await
}

pub async fn delete_comment(session: &SessionStore, id: i64) -> Result<(), ApiError> {
    http::request_no_content(session, HttpMethod::Delete, &comment_endpoint(id), Payload::Empty)
        .await
}

// ── Votes ────────────────────────────────────────────────────────────────

/// Cast, flip, or remove (direction 0) a vote via `POST /votes/`.
pub async fn cast_vote(
    session: &SessionStore,
    target: VoteTarget,
    direction: i8,
) -> Result<VoteOutcome, ApiError> {
    http::request_json(
        session,
        HttpMethod::Post,
        "/votes/",
        Payload::Json(vote_payload(target, direction)),
    )
    .await
}
