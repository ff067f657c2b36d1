//! List posts of a category

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use std::fmt::Write;

use crate::cache::PostCache;
use crate::content::{Category, Post};
use crate::helpers::date::{format_date, relative_date_from};

/// Print the posts of `category`, newest first
pub async fn run(cache: &PostCache, category: &Category, json: bool) -> Result<()> {
    let posts = cache.get_posts(category).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(posts.as_slice())?);
    } else {
        print!("{}", render(category, &posts, Local::now().naive_local()));
    }

    Ok(())
}

/// Text listing of `posts`; dates are shown relative to `now`
pub fn render(category: &Category, posts: &[Post], now: NaiveDateTime) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Posts in {} ({}):", category, posts.len());

    for post in posts {
        let _ = writeln!(out, "{}", summary_line(post, now));
        if !post.excerpt.is_empty() {
            let _ = writeln!(out, "      {}", post.excerpt);
        }
    }

    out
}

/// One-line summary: date, age, title, slug and tags
pub fn summary_line(post: &Post, now: NaiveDateTime) -> String {
    let title = if post.title.is_empty() {
        post.slug.as_str()
    } else {
        post.title.as_str()
    };

    let mut line = if post.date.is_empty() {
        format!("  {} [{}]", title, post.slug)
    } else {
        format!(
            "  {} ({}) - {} [{}]",
            format_date(&post.date),
            relative_date_from(&post.date, now),
            title,
            post.slug
        )
    };

    if !post.tags.is_empty() {
        let _ = write!(line, " #{}", post.tags.join(" #"));
    }
    line
}
