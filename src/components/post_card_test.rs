use super::*;

#[test]
fn post_href_formats_expected_path() {
    assert_eq!(post_href(42), "/post/42");
}

#[test]
fn comment_count_label_pluralizes() {
    assert_eq!(comment_count_label(0), "0 comments");
    assert_eq!(comment_count_label(1), "1 comment");
    assert_eq!(comment_count_label(12), "12 comments");
}

#[test]
fn link_host_strips_scheme_and_path() {
    assert_eq!(link_host("https://example.com/a/b?c=1"), "example.com");
    assert_eq!(link_host("http://news.example.org"), "news.example.org");
    assert_eq!(link_host("example.com/plain"), "example.com");
}
