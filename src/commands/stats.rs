//! Post counts per category and tag

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Write;

use crate::cache::PostCache;
use crate::config::BlogConfig;
use crate::content::{Category, Post};
use crate::helpers::date::days_since;
use crate::helpers::list::{count_categories, count_tags};

/// Print blog statistics
pub async fn run(config: &BlogConfig, cache: &PostCache) -> Result<()> {
    let posts = cache.get_posts(&Category::All).await?;
    print!("{}", render(config, &posts, &Local::now()));
    Ok(())
}

pub fn render<Tz: TimeZone>(config: &BlogConfig, posts: &[Post], now: &DateTime<Tz>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", config.title);
    if !config.subtitle.is_empty() {
        let _ = writeln!(out, "{}", config.subtitle);
    }
    if let Some(days) = config.start_date.as_deref().and_then(|d| days_since(d, now)) {
        let _ = writeln!(out, "Growing for {} days", days);
    }

    let _ = writeln!(out, "\nPosts: {}", posts.len());

    let categories = count_categories(posts);
    if !categories.is_empty() {
        let _ = writeln!(out, "\nCategories ({}):", categories.len());
        for (name, count) in categories {
            let _ = writeln!(out, "  {} ({})", name, count);
        }
    }

    let tags = count_tags(posts);
    if !tags.is_empty() {
        let _ = writeln!(out, "\nTags ({}):", tags.len());
        for (name, count) in tags {
            let _ = writeln!(out, "  {} ({})", name, count);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ParsedPost;
    use chrono::Utc;

    #[test]
    fn test_render_stats() {
        let config = BlogConfig {
            title: "Grove".to_string(),
            subtitle: "A forest that grows together".to_string(),
            start_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        let posts: Vec<Post> = [
            "---\ncategory: dev\ntags: [rust]\n---\n",
            "---\ncategory: dev\ntags: [rust, tokio]\n---\n",
            "---\ncategory: life\n---\n",
        ]
        .iter()
        .map(|raw| Post::from_parsed(&ParsedPost::parse("p", raw), 150))
        .collect();
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

        assert_eq!(
            render(&config, &posts, &now),
            "Grove\nA forest that grows together\nGrowing for 30 days\n\nPosts: 3\n\n\
             Categories (2):\n  dev (2)\n  life (1)\n\n\
             Tags (2):\n  rust (2)\n  tokio (1)\n"
        );
    }

    #[test]
    fn test_render_empty_blog() {
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        assert_eq!(
            render(&BlogConfig::default(), &[], &now),
            "Grove\n\nPosts: 0\n"
        );
    }
}
