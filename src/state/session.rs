//! Session persistence and reactive session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` owns the three persisted entries (access token, refresh
//! token, cached profile) and is handed to the request layer and controllers
//! through Leptos context; nothing else touches storage keys. `SessionState`
//! is the reactive view of the same session that the navbar and route guards
//! render from.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{TokenPair, User};
use crate::util::storage;

const ACCESS_KEY: &str = "tw_access";
const REFRESH_KEY: &str = "tw_refresh";
const USER_KEY: &str = "tw_user";

/// Handle to the persisted session entries.
///
/// Operations are synchronous and never panic; a malformed cached profile
/// reads as absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStore;

impl SessionStore {
    pub fn access_token(&self) -> Option<String> {
        storage::get_item(ACCESS_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        storage::get_item(REFRESH_KEY)
    }

    /// Persist a freshly issued token pair, replacing any previous pair.
    pub fn save_tokens(&self, tokens: &TokenPair) {
        storage::set_item(ACCESS_KEY, &tokens.access_token);
        storage::set_item(REFRESH_KEY, &tokens.refresh_token);
    }

    /// Cache the signed-in user's profile.
    pub fn save_user(&self, user: &User) {
        if let Ok(raw) = serde_json::to_string(user) {
            storage::set_item(USER_KEY, &raw);
        }
    }

    /// Read the cached profile.
    ///
    /// A profile cached without an access token is corrupted session state:
    /// the store clears itself and reports no profile.
    pub fn cached_user(&self) -> Option<User> {
        let raw = storage::get_item(USER_KEY)?;
        let user: User = serde_json::from_str(&raw).ok()?;
        if self.access_token().is_none() {
            self.clear();
            return None;
        }
        Some(user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.access_token().is_some()
    }

    /// Remove all three entries together.
    pub fn clear(&self) {
        storage::remove_item(ACCESS_KEY);
        storage::remove_item(REFRESH_KEY);
        storage::remove_item(USER_KEY);
    }
}

/// Reactive session state provided via context.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Startup session validation: with a stored token, fetch the current user
/// and overwrite the cached profile; on any failure clear the whole session.
///
/// `fetch_me` is the "current user" operation; injected so the fail-closed
/// path is testable without a network.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) async fn bootstrap_with<F, Fut>(store: &SessionStore, fetch_me: F) -> Option<User>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<User, crate::net::http::ApiError>>,
{
    if !store.is_signed_in() {
        return None;
    }
    match fetch_me().await {
        Ok(user) => {
            store.save_user(&user);
            Some(user)
        }
        Err(_) => {
            store.clear();
            None
        }
    }
}
