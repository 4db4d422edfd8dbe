use super::*;

fn minimal_user_json() -> &'static str {
    r#"{
        "id": 7,
        "username": "ada",
        "display_name": null,
        "created_at": "2026-01-02T03:04:05Z"
    }"#
}

#[test]
fn user_private_fields_default_when_absent() {
    let user: User = serde_json::from_str(minimal_user_json()).unwrap();
    assert_eq!(user.id, 7);
    assert!(user.email.is_none());
    assert!(user.is_admin.is_none());
    assert!(user.avatar_url.is_none());
}

#[test]
fn user_label_prefers_display_name() {
    let mut user: User = serde_json::from_str(minimal_user_json()).unwrap();
    assert_eq!(user.label(), "ada");
    user.display_name = Some("Ada Lovelace".to_owned());
    assert_eq!(user.label(), "Ada Lovelace");
}

#[test]
fn user_label_ignores_empty_display_name() {
    let mut user: User = serde_json::from_str(minimal_user_json()).unwrap();
    user.display_name = Some(String::new());
    assert_eq!(user.label(), "ada");
}

#[test]
fn token_pair_type_defaults_to_bearer() {
    let pair: TokenPair =
        serde_json::from_str(r#"{"access_token":"a","refresh_token":"r"}"#).unwrap();
    assert_eq!(pair.token_type, "bearer");
}

#[test]
fn post_user_vote_defaults_to_none() {
    let raw = format!(
        r#"{{
            "id": 1, "title": "t", "body": null, "link_url": null,
            "author": {}, "score": 3, "comment_count": 0,
            "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"
        }}"#,
        minimal_user_json()
    );
    let post: Post = serde_json::from_str(&raw).unwrap();
    assert!(post.user_vote.is_none());
    assert_eq!(post.score, 3);
}

#[test]
fn comment_replies_default_and_nest() {
    let raw = format!(
        r#"{{
            "id": 10, "body": "parent", "author": {user}, "post_id": 1,
            "parent_id": null, "score": 1,
            "replies": [{{
                "id": 11, "body": "child", "author": {user}, "post_id": 1,
                "parent_id": 10, "score": 0,
                "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"
            }}],
            "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"
        }}"#,
        user = minimal_user_json()
    );
    let comment: Comment = serde_json::from_str(&raw).unwrap();
    assert_eq!(comment.replies.len(), 1);
    assert_eq!(comment.replies[0].parent_id, Some(10));
    assert!(comment.replies[0].replies.is_empty());
}

#[test]
fn sort_mode_query_values() {
    assert_eq!(SortMode::default().as_query(), "new");
    assert_eq!(SortMode::Top.as_query(), "top");
}
