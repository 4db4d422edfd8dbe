use super::*;

#[test]
fn user_endpoints_format_expected_paths() {
    assert_eq!(user_endpoint("ada"), "/users/ada");
    assert_eq!(user_posts_endpoint("ada", 0), "/users/ada/posts?skip=0");
    assert_eq!(user_posts_endpoint("ada", 40), "/users/ada/posts?skip=40");
}

#[test]
fn posts_endpoint_carries_pagination_and_sort() {
    assert_eq!(posts_endpoint(0, SortMode::New), "/posts/?skip=0&sort=new");
    assert_eq!(posts_endpoint(20, SortMode::Top), "/posts/?skip=20&sort=top");
    assert_eq!(post_endpoint(17), "/posts/17");
}

#[test]
fn comment_endpoints_format_expected_paths() {
    assert_eq!(post_comments_endpoint(5), "/comments/post/5");
    assert_eq!(comment_endpoint(9), "/comments/9");
}

#[test]
fn vote_payload_sets_exactly_one_target() {
    let up = vote_payload(VoteTarget::Post(3), 1);
    assert_eq!(up, serde_json::json!({ "direction": 1, "post_id": 3 }));
    assert!(up.get("comment_id").is_none());

    let down = vote_payload(VoteTarget::Comment(8), -1);
    assert_eq!(down, serde_json::json!({ "direction": -1, "comment_id": 8 }));
    assert!(down.get("post_id").is_none());
}

#[test]
fn vote_payload_direction_zero_removes() {
    let remove = vote_payload(VoteTarget::Post(3), 0);
    assert_eq!(remove["direction"], 0);
}

#[test]
fn patch_payload_omits_absent_fields() {
    let patch = patch_payload(&[("display_name", Some("Ada")), ("bio", None)]);
    assert_eq!(patch, serde_json::json!({ "display_name": "Ada" }));

    let empty = patch_payload(&[("title", None), ("body", None)]);
    assert_eq!(empty, serde_json::json!({}));
}
