use super::*;

fn post(id: i64) -> Post {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("post {id}"),
        "body": null,
        "link_url": null,
        "author": {
            "id": 1,
            "username": "ada",
            "display_name": null,
            "created_at": "2026-01-01T00:00:00Z"
        },
        "score": 0,
        "comment_count": 0,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    }))
    .unwrap()
}

#[test]
fn default_feed_is_empty_and_sorted_new() {
    let feed = FeedState::default();
    assert!(feed.posts.is_empty());
    assert_eq!(feed.sort, SortMode::New);
    assert!(!feed.loading);
    assert!(feed.error.is_none());
}

#[test]
fn restart_clears_items_and_switches_sort() {
    let mut feed = FeedState::default();
    feed.absorb_page(vec![post(1), post(2)]);
    feed.restart(SortMode::Top);

    assert!(feed.posts.is_empty());
    assert_eq!(feed.sort, SortMode::Top);
    assert_eq!(feed.skip, 0);
    assert!(feed.loading);
}

#[test]
fn absorb_page_advances_cursor_and_tracks_more() {
    let mut feed = FeedState::default();
    let full_page: Vec<Post> = (0..i64::from(FEED_PAGE_SIZE)).map(post).collect();
    feed.absorb_page(full_page);
    assert_eq!(feed.skip, FEED_PAGE_SIZE);
    assert!(feed.more_available);

    feed.absorb_page(vec![post(100)]);
    assert_eq!(feed.skip, FEED_PAGE_SIZE + 1);
    assert!(!feed.more_available);
}

#[test]
fn fail_records_message_and_stops_loading() {
    let mut feed = FeedState::default();
    feed.restart(SortMode::New);
    feed.fail("HTTP 500".to_owned());

    assert!(!feed.loading);
    assert_eq!(feed.error.as_deref(), Some("HTTP 500"));
}
