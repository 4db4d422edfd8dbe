//! Authenticated request executor for the TrackWeave REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every façade operation funnels through here: bearer-token attachment, the
//! single 401 refresh-and-retry cycle, timeouts, and error-body decoding all
//! live in one place. The executor never navigates: refresh failure surfaces
//! as [`ApiError::Unauthenticated`] and controllers decide what to do with it.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side (SSR):
//! stubs returning [`ApiError::Unavailable`] since these calls are only
//! meaningful in the browser.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

#[cfg(feature = "hydrate")]
use super::types::TokenPair;
use crate::state::session::SessionStore;

/// Base path all endpoint paths are relative to.
pub const API_BASE: &str = "/api";

/// Upper bound on any single outbound call, refresh included.
#[cfg(feature = "hydrate")]
const REQUEST_TIMEOUT_MS: u32 = 15_000;

/// Failure modes of the request layer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the request. `message` prefers the error body's
    /// `detail` field and falls back to `HTTP <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The session could not be re-established after a 401; the store has
    /// been cleared.
    #[error("not signed in")]
    Unauthenticated,
    /// Transport-level failure before any response arrived.
    #[error("network error: {0}")]
    Network(String),
    /// No response within the request timeout.
    #[error("request timed out")]
    Timeout,
    /// A success response carried a body the caller could not decode.
    #[error("malformed response: {0}")]
    Decode(String),
    /// Browser-only operation invoked during server rendering.
    #[error("not available on server")]
    Unavailable,
}

/// HTTP methods the façade uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// Request body accepted by the executor.
///
/// Multipart bodies go through the same retry/refresh path as JSON ones, so
/// uploads behave like every other authenticated call.
#[derive(Debug)]
pub enum Payload {
    Empty,
    Json(serde_json::Value),
    #[cfg(feature = "hydrate")]
    Form(web_sys::FormData),
}

#[cfg(any(test, feature = "hydrate"))]
fn authorization_header(token: Option<&str>) -> Option<String> {
    token.map(|token| format!("Bearer {token}"))
}

/// Human-readable failure text for a non-2xx response.
///
/// A malformed or non-JSON error body must not break the failure path, so
/// anything unparsable falls back to the generic status message.
#[cfg(any(test, feature = "hydrate"))]
fn failure_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, body: &str) -> ApiError {
    ApiError::Status {
        status,
        message: failure_message(status, body),
    }
}

/// Decode a success response body. 204 and empty bodies resolve to an
/// explicit empty value without any JSON parsing.
#[cfg(any(test, feature = "hydrate"))]
fn decode_success(status: u16, body: &str) -> Result<serde_json::Value, ApiError> {
    if status == 204 || body.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// The 401 refresh-and-retry cycle, generic over the attempt and refresh
/// futures.
///
/// The first attempt runs with the currently stored access token. A 401
/// triggers `refresh` exactly once: on success the attempt is re-run with
/// the newly stored token (a second 401 surfaces as a plain status error);
/// on failure the store is cleared and the caller gets
/// [`ApiError::Unauthenticated`]. Any other outcome of the first attempt is
/// returned untouched.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) async fn run_with_refresh<T, A, AF, R, RF>(
    session: &SessionStore,
    mut attempt: A,
    refresh: R,
) -> Result<T, ApiError>
where
    A: FnMut(Option<String>) -> AF,
    AF: Future<Output = Result<T, ApiError>>,
    R: FnOnce() -> RF,
    RF: Future<Output = bool>,
{
    let first = attempt(session.access_token()).await;
    if !matches!(first, Err(ApiError::Status { status: 401, .. })) {
        return first;
    }
    if !refresh().await {
        session.clear();
        return Err(ApiError::Unauthenticated);
    }
    attempt(session.access_token()).await
}

/// The refresh contract: no stored refresh token is an immediate failure;
/// otherwise `exchange` posts it to the refresh endpoint and yields the new
/// pair, which is persisted before success is reported. All exchange
/// failures collapse to `false`.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) async fn refresh_with<F, Fut>(session: &SessionStore, exchange: F) -> bool
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Option<crate::net::types::TokenPair>>,
{
    let Some(refresh_token) = session.refresh_token() else {
        return false;
    };
    match exchange(refresh_token).await {
        Some(pair) => {
            session.save_tokens(&pair);
            true
        }
        None => false,
    }
}

#[cfg(feature = "hydrate")]
async fn send_with_timeout(
    request: gloo_net::http::Request,
) -> Result<gloo_net::http::Response, ApiError> {
    use futures::future::{Either, select};

    let fetch = std::pin::pin!(request.send());
    let timeout = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(REQUEST_TIMEOUT_MS));
    match select(fetch, timeout).await {
        Either::Left((result, _)) => result.map_err(|err| ApiError::Network(err.to_string())),
        Either::Right(_) => Err(ApiError::Timeout),
    }
}

/// One HTTP attempt: build, send, and map the response to either a decoded
/// JSON value or an [`ApiError`].
#[cfg(feature = "hydrate")]
async fn attempt_once(
    method: HttpMethod,
    path: &str,
    token: Option<String>,
    payload: &Payload,
) -> Result<serde_json::Value, ApiError> {
    use gloo_net::http::Request;

    let url = format!("{API_BASE}{path}");
    let mut builder = match method {
        HttpMethod::Get => Request::get(&url),
        HttpMethod::Post => Request::post(&url),
        HttpMethod::Patch => Request::patch(&url),
        HttpMethod::Delete => Request::delete(&url),
    };
    if let Some(value) = authorization_header(token.as_deref()) {
        builder = builder.header("Authorization", &value);
    }
    let request = match payload {
        Payload::Empty => builder.build(),
        Payload::Json(body) => builder.json(body),
        // The browser supplies the multipart content type and boundary.
        Payload::Form(form) => builder.body(form.clone()),
    }
    .map_err(|err| ApiError::Network(err.to_string()))?;

    let response = send_with_timeout(request).await?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !(200..300).contains(&status) {
        return Err(status_error(status, &body));
    }
    decode_success(status, &body)
}

/// Exchange the stored refresh token for a new pair via `POST /auth/refresh`.
#[cfg(feature = "hydrate")]
pub async fn refresh_session(session: &SessionStore) -> bool {
    refresh_with(session, |refresh_token| async move {
        let payload = serde_json::json!({ "refresh_token": refresh_token });
        let request = gloo_net::http::Request::post(&format!("{API_BASE}/auth/refresh"))
            .json(&payload)
            .ok()?;
        let response = send_with_timeout(request).await.ok()?;
        if !response.ok() {
            return None;
        }
        response.json::<TokenPair>().await.ok()
    })
    .await
}

#[cfg(feature = "hydrate")]
async fn request(
    session: &SessionStore,
    method: HttpMethod,
    path: &str,
    payload: &Payload,
) -> Result<serde_json::Value, ApiError> {
    run_with_refresh(
        session,
        move |token| attempt_once(method, path, token, payload),
        || refresh_session(session),
    )
    .await
}

/// Execute an authenticated request and decode the JSON response body.
pub async fn request_json<T>(
    session: &SessionStore,
    method: HttpMethod,
    path: &str,
    payload: Payload,
) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    #[cfg(feature = "hydrate")]
    {
        let value = request(session, method, path, &payload).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, method, path, payload);
        Err(ApiError::Unavailable)
    }
}

/// Execute an authenticated request whose success carries no body (204).
pub async fn request_no_content(
    session: &SessionStore,
    method: HttpMethod,
    path: &str,
    payload: Payload,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        request(session, method, path, &payload).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, method, path, payload);
        Err(ApiError::Unavailable)
    }
}
