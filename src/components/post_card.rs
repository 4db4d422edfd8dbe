//! Feed list item for a single post.

#[cfg(test)]
#[path = "post_card_test.rs"]
mod post_card_test;

use leptos::prelude::*;

use crate::components::avatar::Avatar;
use crate::components::vote_buttons::VoteButtons;
use crate::net::types::{Post, VoteTarget};
use crate::util::time_ago::time_ago;

fn post_href(id: i64) -> String {
    format!("/post/{id}")
}

fn comment_count_label(count: i64) -> String {
    if count == 1 {
        "1 comment".to_owned()
    } else {
        format!("{count} comments")
    }
}

/// Display host for an outbound link, e.g. `https://a.io/x?y` → `a.io`.
fn link_host(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or(rest).to_owned()
}

#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let href = post_href(post.id);
    let comments_href = post_href(post.id);
    let author = post.author.clone();
    let author_label = author.label().to_owned();
    let created = time_ago(&post.created_at);

    view! {
        <article class="post-card">
            <VoteButtons target=VoteTarget::Post(post.id) score=post.score user_vote=post.user_vote/>
            <div class="post-card__main">
                <a class="post-card__title" href=href>{post.title.clone()}</a>
                {post.link_url.clone().map(|url| {
                    let host = link_host(&url);
                    view! {
                        <a class="post-card__link" href=url target="_blank" rel="noopener">
                            {format!("({host})")}
                        </a>
                    }
                })}
                <div class="post-card__meta">
                    <Avatar user=author size=20/>
                    <span class="post-card__author">{author_label}</span>
                    <span class="post-card__dot">"·"</span>
                    <span class="post-card__time">{created}</span>
                    <a class="post-card__comments" href=comments_href>
                        {comment_count_label(post.comment_count)}
                    </a>
                </div>
            </div>
        </article>
    }
}
