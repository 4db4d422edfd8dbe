//! User avatar: uploaded image or an initial badge.

#[cfg(test)]
#[path = "avatar_test.rs"]
mod avatar_test;

use leptos::prelude::*;

use crate::net::types::User;

/// First letter shown on the fallback badge, preferring the display name
/// over the username, uppercased.
fn avatar_initial(display_name: Option<&str>, username: &str) -> String {
    let source = display_name.filter(|name| !name.is_empty()).unwrap_or(username);
    source
        .chars()
        .next()
        .map_or_else(|| "?".to_owned(), |ch| ch.to_uppercase().collect())
}

/// Badge font size in pixels, proportional to the badge with a floor of 10.
fn badge_font_px(size: u32) -> u32 {
    (size * 2 / 5).max(10)
}

/// Avatar image when the profile has one, otherwise a filled circular badge
/// with the user's initial, both sized to `size` pixels.
#[component]
pub fn Avatar(user: User, #[prop(default = 32)] size: u32) -> impl IntoView {
    match user.avatar_url.clone() {
        Some(url) => view! {
            <img
                class="avatar"
                src=url
                alt=user.username.clone()
                style=format!("width:{size}px;height:{size}px;")
            />
        }
        .into_any(),
        None => {
            let initial = avatar_initial(user.display_name.as_deref(), &user.username);
            let style = format!(
                "width:{size}px;height:{size}px;font-size:{}px;",
                badge_font_px(size)
            );
            view! { <div class="avatar avatar--badge" style=style>{initial}</div> }.into_any()
        }
    }
}
