use futures::executor::block_on;

use super::*;
use crate::net::http::ApiError;
use crate::util::storage;

fn sample_pair() -> TokenPair {
    TokenPair {
        access_token: "access-1".to_owned(),
        refresh_token: "refresh-1".to_owned(),
        token_type: "bearer".to_owned(),
    }
}

fn sample_user() -> User {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "username": "ada",
        "display_name": "Ada",
        "created_at": "2026-01-01T00:00:00Z"
    }))
    .unwrap()
}

// =============================================================
// Store round-trips
// =============================================================

#[test]
fn tokens_round_trip_and_overwrite() {
    let store = SessionStore;
    store.clear();
    assert!(store.access_token().is_none());
    assert!(!store.is_signed_in());

    store.save_tokens(&sample_pair());
    assert_eq!(store.access_token().as_deref(), Some("access-1"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    assert!(store.is_signed_in());

    store.save_tokens(&TokenPair {
        access_token: "access-2".to_owned(),
        refresh_token: "refresh-2".to_owned(),
        token_type: "bearer".to_owned(),
    });
    assert_eq!(store.access_token().as_deref(), Some("access-2"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh-2"));
}

#[test]
fn clear_removes_all_three_entries() {
    let store = SessionStore;
    store.save_tokens(&sample_pair());
    store.save_user(&sample_user());

    store.clear();

    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert!(store.cached_user().is_none());
}

#[test]
fn cached_user_round_trips() {
    let store = SessionStore;
    store.clear();
    store.save_tokens(&sample_pair());
    store.save_user(&sample_user());

    let user = store.cached_user().unwrap();
    assert_eq!(user.username, "ada");
}

#[test]
fn malformed_cached_profile_reads_as_absent() {
    let store = SessionStore;
    store.clear();
    store.save_tokens(&sample_pair());
    storage::set_item("tw_user", "{not json");

    assert!(store.cached_user().is_none());
    // Malformed data alone is not corruption; the token survives.
    assert!(store.is_signed_in());
}

#[test]
fn profile_without_token_is_corrupted_state() {
    let store = SessionStore;
    store.clear();
    storage::set_item("tw_user", &serde_json::to_string(&sample_user()).unwrap());

    assert!(store.cached_user().is_none());
    // The store cleared itself.
    assert!(storage::get_item("tw_user").is_none());
}

// =============================================================
// Session bootstrap
// =============================================================

#[test]
fn bootstrap_without_token_skips_the_network() {
    let store = SessionStore;
    store.clear();

    let result = block_on(bootstrap_with(&store, || async {
        panic!("fetch_me must not run without a token")
    }));

    assert!(result.is_none());
}

#[test]
fn bootstrap_success_overwrites_cached_profile() {
    let store = SessionStore;
    store.clear();
    store.save_tokens(&sample_pair());

    let result = block_on(bootstrap_with(&store, || async { Ok(sample_user()) }));

    assert_eq!(result.map(|u| u.username), Some("ada".to_owned()));
    assert_eq!(store.cached_user().map(|u| u.username), Some("ada".to_owned()));
}

#[test]
fn bootstrap_failure_clears_the_whole_session() {
    let store = SessionStore;
    store.clear();
    store.save_tokens(&sample_pair());
    store.save_user(&sample_user());

    let result = block_on(bootstrap_with(&store, || async {
        Err(ApiError::Status { status: 401, message: "HTTP 401".to_owned() })
    }));

    assert!(result.is_none());
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert!(store.cached_user().is_none());
}

// =============================================================
// Reactive state
// =============================================================

#[test]
fn session_state_defaults_signed_out() {
    let state = SessionState::default();
    assert!(!state.is_signed_in());
    assert!(!state.loading);
}

#[test]
fn session_state_with_user_is_signed_in() {
    let state = SessionState { user: Some(sample_user()), loading: false };
    assert!(state.is_signed_in());
}
