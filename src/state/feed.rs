//! Feed list state for the home page.
//!
//! DESIGN
//! ======
//! Separating list state from post-detail state keeps pagination and sort
//! concerns out of the post page.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use crate::net::types::{Post, SortMode};

/// How many posts one feed page requests; mirrors the backend default limit.
pub const FEED_PAGE_SIZE: u32 = 20;

/// Shared feed state backed by `GET /posts/`.
#[derive(Clone, Debug, Default)]
pub struct FeedState {
    pub posts: Vec<Post>,
    pub sort: SortMode,
    pub skip: u32,
    pub loading: bool,
    /// Cleared when the most recent page came back shorter than a full page.
    pub more_available: bool,
    pub error: Option<String>,
}

impl FeedState {
    /// Reset for a fresh first page in `sort` order.
    pub fn restart(&mut self, sort: SortMode) {
        self.posts.clear();
        self.sort = sort;
        self.skip = 0;
        self.loading = true;
        self.more_available = false;
        self.error = None;
    }

    /// Fold one fetched page into the list and advance the cursor.
    pub fn absorb_page(&mut self, page: Vec<Post>) {
        let fetched = u32::try_from(page.len()).unwrap_or(u32::MAX);
        self.more_available = fetched >= FEED_PAGE_SIZE;
        self.skip = self.skip.saturating_add(fetched);
        self.posts.extend(page);
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}
