use super::*;

#[test]
fn initial_prefers_display_name() {
    assert_eq!(avatar_initial(Some("grace"), "hopper"), "G");
}

#[test]
fn initial_falls_back_to_username() {
    assert_eq!(avatar_initial(None, "ada"), "A");
    assert_eq!(avatar_initial(Some(""), "ada"), "A");
}

#[test]
fn initial_is_a_single_uppercased_letter() {
    let initial = avatar_initial(Some("ada lovelace"), "unused");
    assert_eq!(initial.chars().count(), 1);
    assert_eq!(initial, "A");
}

#[test]
fn initial_handles_empty_names() {
    assert_eq!(avatar_initial(None, ""), "?");
}

#[test]
fn badge_font_scales_with_floor() {
    assert_eq!(badge_font_px(30), 12);
    assert_eq!(badge_font_px(64), 25);
    // Tiny badges clamp to a readable minimum.
    assert_eq!(badge_font_px(16), 10);
}
