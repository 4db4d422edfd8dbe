use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::net::types::TokenPair;

fn pair(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access_token: access.to_owned(),
        refresh_token: refresh.to_owned(),
        token_type: "bearer".to_owned(),
    }
}

fn unauthorized() -> ApiError {
    status_error(401, r#"{"detail":"Could not validate credentials."}"#)
}

fn sample_user() -> crate::net::types::User {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "username": "ada",
        "display_name": "Ada",
        "created_at": "2026-01-01T00:00:00Z"
    }))
    .unwrap()
}

// =============================================================
// Message and body decoding
// =============================================================

#[test]
fn failure_message_prefers_detail_field() {
    assert_eq!(failure_message(409, r#"{"detail":"Username already taken."}"#), "Username already taken.");
}

#[test]
fn failure_message_falls_back_on_unparsable_body() {
    assert_eq!(failure_message(500, "<html>oops</html>"), "HTTP 500");
    assert_eq!(failure_message(502, ""), "HTTP 502");
}

#[test]
fn failure_message_falls_back_when_detail_missing() {
    assert_eq!(failure_message(422, r#"{"errors":["x"]}"#), "HTTP 422");
}

#[test]
fn decode_success_resolves_204_without_parsing() {
    // Even a garbage body must not be parsed on 204.
    assert_eq!(decode_success(204, "not json"), Ok(serde_json::Value::Null));
    assert_eq!(decode_success(200, ""), Ok(serde_json::Value::Null));
}

#[test]
fn decode_success_parses_json_bodies() {
    assert_eq!(decode_success(200, r#"{"ok":true}"#), Ok(serde_json::json!({"ok": true})));
    assert!(matches!(decode_success(200, "{"), Err(ApiError::Decode(_))));
}

#[test]
fn authorization_header_absent_without_token() {
    assert_eq!(authorization_header(None), None);
    assert_eq!(authorization_header(Some("abc")), Some("Bearer abc".to_owned()));
}

// =============================================================
// Refresh-and-retry cycle
// =============================================================

#[test]
fn successful_attempt_never_refreshes() {
    let session = SessionStore;
    session.clear();
    session.save_tokens(&pair("access-1", "refresh-1"));

    let refreshed = Rc::new(Cell::new(false));
    let refreshed_flag = refreshed.clone();
    let result = block_on(run_with_refresh(
        &session,
        |token| async move { Ok(token) },
        move || {
            refreshed_flag.set(true);
            async { false }
        },
    ));

    assert_eq!(result, Ok(Some("access-1".to_owned())));
    assert!(!refreshed.get());
}

#[test]
fn missing_token_attempts_without_authorization() {
    let session = SessionStore;
    session.clear();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_tokens = seen.clone();
    let result = block_on(run_with_refresh(
        &session,
        move |token| {
            seen_tokens.borrow_mut().push(token.clone());
            async move { Ok(authorization_header(token.as_deref())) }
        },
        || async { false },
    ));

    assert_eq!(result, Ok(None));
    assert_eq!(*seen.borrow(), vec![None]);
}

#[test]
fn unauthorized_then_refresh_retries_with_new_token() {
    let session = SessionStore;
    session.clear();
    session.save_tokens(&pair("stale", "refresh-1"));

    let attempts = Rc::new(RefCell::new(Vec::new()));
    let refreshes = Rc::new(Cell::new(0));

    let attempt_log = attempts.clone();
    let refresh_count = refreshes.clone();
    let result = block_on(run_with_refresh(
        &session,
        move |token| {
            attempt_log.borrow_mut().push(token);
            let first = attempt_log.borrow().len() == 1;
            async move {
                if first { Err(unauthorized()) } else { Ok("payload".to_owned()) }
            }
        },
        move || {
            refresh_count.set(refresh_count.get() + 1);
            let session = SessionStore;
            async move {
                session.save_tokens(&pair("fresh", "refresh-2"));
                true
            }
        },
    ));

    assert_eq!(result, Ok("payload".to_owned()));
    assert_eq!(refreshes.get(), 1);
    assert_eq!(
        *attempts.borrow(),
        vec![Some("stale".to_owned()), Some("fresh".to_owned())]
    );
}

#[test]
fn second_unauthorized_is_not_retried_again() {
    let session = SessionStore;
    session.clear();
    session.save_tokens(&pair("stale", "refresh-1"));

    let attempts = Rc::new(Cell::new(0));
    let attempt_count = attempts.clone();
    let result: Result<(), ApiError> = block_on(run_with_refresh(
        &session,
        move |_token| {
            attempt_count.set(attempt_count.get() + 1);
            async { Err(unauthorized()) }
        },
        || async {
            SessionStore.save_tokens(&pair("fresh", "refresh-2"));
            true
        },
    ));

    assert!(matches!(result, Err(ApiError::Status { status: 401, .. })));
    assert_eq!(attempts.get(), 2);
}

#[test]
fn refresh_failure_clears_session_and_reports_unauthenticated() {
    let session = SessionStore;
    session.clear();
    session.save_tokens(&pair("stale", "refresh-1"));
    session.save_user(&sample_user());

    let result: Result<(), ApiError> = block_on(run_with_refresh(
        &session,
        |_token| async { Err(unauthorized()) },
        || async { false },
    ));

    assert_eq!(result, Err(ApiError::Unauthenticated));
    assert!(session.access_token().is_none());
    assert!(session.refresh_token().is_none());
    assert!(session.cached_user().is_none());
}

#[test]
fn non_authorization_failures_skip_refresh() {
    let session = SessionStore;
    session.clear();
    session.save_tokens(&pair("access-1", "refresh-1"));

    let refreshed = Rc::new(Cell::new(false));
    let refreshed_flag = refreshed.clone();
    let result: Result<(), ApiError> = block_on(run_with_refresh(
        &session,
        |_token| async { Err(status_error(500, "")) },
        move || {
            refreshed_flag.set(true);
            async { false }
        },
    ));

    assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
    assert!(!refreshed.get());
    // The stored pair survives a non-auth failure.
    assert_eq!(session.access_token().as_deref(), Some("access-1"));
}

#[test]
fn fresh_login_serves_requests_without_refresh() {
    let session = SessionStore;
    session.clear();
    // Login stores a pair...
    session.save_tokens(&pair("login-access", "login-refresh"));

    let refreshed = Rc::new(Cell::new(false));
    let refreshed_flag = refreshed.clone();
    // ...and the next authenticated call succeeds on the first attempt.
    let result = block_on(run_with_refresh(
        &session,
        |token| async move { Ok(token) },
        move || {
            refreshed_flag.set(true);
            async { false }
        },
    ));

    assert_eq!(result, Ok(Some("login-access".to_owned())));
    assert!(!refreshed.get());
}

// =============================================================
// Refresh procedure contract
// =============================================================

#[test]
fn refresh_without_stored_token_fails_immediately() {
    let session = SessionStore;
    session.clear();

    let exchanged = Rc::new(Cell::new(false));
    let exchanged_flag = exchanged.clone();
    let ok = block_on(refresh_with(&session, move |_token| {
        exchanged_flag.set(true);
        async { Some(pair("a", "r")) }
    }));

    assert!(!ok);
    assert!(!exchanged.get());
}

#[test]
fn refresh_exchange_failure_reports_false() {
    let session = SessionStore;
    session.clear();
    session.save_tokens(&pair("stale", "refresh-1"));

    let ok = block_on(refresh_with(&session, |_token| async { None }));

    assert!(!ok);
    // A failed exchange does not clear the store by itself; the retry cycle
    // owns that decision.
    assert_eq!(session.refresh_token().as_deref(), Some("refresh-1"));
}

#[test]
fn refresh_success_persists_the_new_pair() {
    let session = SessionStore;
    session.clear();
    session.save_tokens(&pair("stale", "refresh-1"));

    let seen = Rc::new(RefCell::new(None));
    let seen_token = seen.clone();
    let ok = block_on(refresh_with(&session, move |token| {
        *seen_token.borrow_mut() = Some(token);
        async { Some(pair("fresh", "refresh-2")) }
    }));

    assert!(ok);
    assert_eq!(seen.borrow().as_deref(), Some("refresh-1"));
    assert_eq!(session.access_token().as_deref(), Some("fresh"));
    assert_eq!(session.refresh_token().as_deref(), Some("refresh-2"));
}
