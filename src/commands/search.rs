//! Search posts by text or tag

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use std::fmt::Write;

use super::list::summary_line;
use crate::cache::PostCache;
use crate::content::{Category, Post};
use crate::helpers::list::{posts_with_tag, search_posts};

/// How a search query is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Substring match over title, description, excerpt and tags
    Text,
    /// Exact tag match
    Tag,
}

/// Print the posts of `category` matching `query`
pub async fn run(
    cache: &PostCache,
    category: &Category,
    query: &str,
    mode: SearchMode,
) -> Result<()> {
    let posts = cache.get_posts(category).await?;
    let matches = find(&posts, query, mode);
    print!("{}", render(query, &matches, Local::now().naive_local()));
    Ok(())
}

pub fn find<'a>(posts: &'a [Post], query: &str, mode: SearchMode) -> Vec<&'a Post> {
    match mode {
        SearchMode::Text => search_posts(posts, query),
        SearchMode::Tag => posts_with_tag(posts, query.trim()),
    }
}

pub fn render(query: &str, matches: &[&Post], now: NaiveDateTime) -> String {
    let mut out = String::new();
    if matches.is_empty() {
        let _ = writeln!(out, "No posts match \"{}\".", query);
        return out;
    }

    let _ = writeln!(out, "{} result(s) for \"{}\":", matches.len(), query);
    for post in matches {
        let _ = writeln!(out, "{}", summary_line(post, now));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ParsedPost;
    use crate::helpers::date::parse_date;

    fn posts() -> Vec<Post> {
        [
            ("a", "---\ntitle: Rust Notes\ntags: [rust]\n---\nOwnership.\n"),
            ("b", "---\ntitle: Tea\ntags: [life, rusty]\n---\nGreen tea.\n"),
        ]
        .iter()
        .map(|(slug, raw)| Post::from_parsed(&ParsedPost::parse(*slug, raw), 150))
        .collect()
    }

    #[test]
    fn test_text_vs_tag_mode() {
        let posts = posts();
        let text: Vec<_> = find(&posts, "rust", SearchMode::Text)
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(text, ["a", "b"]);

        let tag: Vec<_> = find(&posts, " rust ", SearchMode::Tag)
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(tag, ["a"]);
    }

    #[test]
    fn test_render_results() {
        let now = parse_date("2024-01-01").unwrap();
        let posts = posts();
        let matches = find(&posts, "tea", SearchMode::Text);
        assert_eq!(
            render("tea", &matches, now),
            "1 result(s) for \"tea\":\n  Tea [b] #life #rusty\n"
        );
        assert_eq!(render("zzz", &[], now), "No posts match \"zzz\".\n");
    }
}
