//! Show a single post

use anyhow::{bail, Result};
use chrono::{Local, NaiveDateTime};
use std::fmt::Write;

use crate::cache::PostCache;
use crate::content::{Category, Post, PostDetail};
use crate::helpers::date::{format_date, relative_date_from};

/// Print the post `slug` with its neighbours in the full list
pub async fn run(cache: &PostCache, slug: &str, json: bool) -> Result<()> {
    let detail = match cache.get_post(slug).await {
        Ok(detail) => detail,
        Err(e) if e.is_not_found() => bail!("Post not found: {}", slug),
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    // Neighbours are a nicety; the post itself already loaded
    let posts = match cache.get_posts(&Category::All).await {
        Ok(posts) => posts.to_vec(),
        Err(e) => {
            tracing::warn!("Could not load post list for navigation: {}", e);
            Vec::new()
        }
    };

    print!("{}", render(&detail, &posts, Local::now().naive_local()));
    Ok(())
}

/// Text view of a post; `posts` is the sorted list used for newer/older links
pub fn render(detail: &PostDetail, posts: &[Post], now: NaiveDateTime) -> String {
    let post = &detail.post;
    let mut out = String::new();

    let title = if post.title.is_empty() {
        &post.slug
    } else {
        &post.title
    };
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));

    let mut meta = Vec::new();
    if !post.date.is_empty() {
        meta.push(format!(
            "{} ({})",
            format_date(&post.date),
            relative_date_from(&post.date, now)
        ));
    }
    if !post.category.is_empty() {
        meta.push(post.category.clone());
    }
    let read_time = if post.read_time.is_empty() {
        format!("{} min read", detail.reading_minutes)
    } else {
        post.read_time.clone()
    };
    meta.push(read_time);
    let _ = writeln!(out, "{}", meta.join(" · "));

    if !post.tags.is_empty() {
        let _ = writeln!(out, "#{}", post.tags.join(" #"));
    }
    if !post.description.is_empty() {
        let _ = writeln!(out, "\n> {}", post.description);
    }

    let _ = writeln!(out, "\n{}", detail.content.trim_end());

    if let Some(newer) = post.prev(posts) {
        let _ = writeln!(out, "\nNewer: {} [{}]", newer.title, newer.slug);
    }
    if let Some(older) = post.next(posts) {
        let _ = writeln!(out, "Older: {} [{}]", older.title, older.slug);
    }

    out
}
