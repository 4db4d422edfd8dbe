//! Wire DTOs for the TrackWeave REST backend.
//!
//! DESIGN
//! ======
//! These types mirror the backend response schemas so serde round-trips stay
//! lossless. Fields the backend only includes for the authenticated user
//! (`email`, `is_admin`) are defaulted so public and private payloads share
//! one type.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Access/refresh token pair returned by register, login, and refresh.
///
/// Both tokens are opaque bearer credentials; the client never inspects
/// their structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// A TrackWeave user account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// Present only when the payload describes the authenticated user.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

impl User {
    /// Name shown in UI chrome: display name when set and non-empty,
    /// username otherwise.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

/// A post as returned by the feed and post endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub link_url: Option<String>,
    pub author: User,
    /// Sum of vote directions, computed server-side.
    pub score: i64,
    pub comment_count: i64,
    /// The viewer's own vote (+1/-1), absent when signed out or unvoted.
    #[serde(default)]
    pub user_vote: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

/// A comment, with replies nested one level per parent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub author: User,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub score: i64,
    #[serde(default)]
    pub user_vote: Option<i32>,
    #[serde(default)]
    pub replies: Vec<Comment>,
    pub created_at: String,
    pub updated_at: String,
}

/// Acknowledgement returned by the vote endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub message: String,
    pub new_score: i64,
}

/// What a vote applies to. The backend requires exactly one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteTarget {
    Post(i64),
    Comment(i64),
}

/// Feed ordering accepted by `GET /posts/`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    New,
    Top,
}

impl SortMode {
    /// Query-string value for this mode.
    pub fn as_query(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Top => "top",
        }
    }
}
