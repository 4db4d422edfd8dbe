use super::*;

#[test]
fn post_title_is_trimmed_and_required() {
    assert_eq!(validate_post_title("  Hello  "), Ok("Hello".to_owned()));
    assert_eq!(validate_post_title("   "), Err("Give your post a title."));
}

#[test]
fn post_title_length_is_bounded() {
    assert!(validate_post_title(&"t".repeat(MAX_TITLE_LEN)).is_ok());
    assert_eq!(
        validate_post_title(&"t".repeat(MAX_TITLE_LEN + 1)),
        Err("Title is too long.")
    );
}

#[test]
fn empty_link_is_no_link() {
    assert_eq!(validate_link_url("   "), Ok(None));
}

#[test]
fn link_requires_http_scheme() {
    assert_eq!(
        validate_link_url("https://example.com/x"),
        Ok(Some("https://example.com/x".to_owned()))
    );
    assert_eq!(
        validate_link_url("ftp://example.com"),
        Err("Links must start with http:// or https://.")
    );
    assert_eq!(
        validate_link_url("example.com"),
        Err("Links must start with http:// or https://.")
    );
}
