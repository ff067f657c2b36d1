//! Post models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::excerpt::excerpt;
use super::frontmatter::{Metadata, ParsedPost};
use crate::helpers::date::reading_minutes;

/// A post as shown in lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// URL-friendly identifier, taken from the file name
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date as written in the front-matter
    pub date: String,

    /// Category the post is filed under
    pub category: String,

    /// Short description for cards
    pub description: String,

    /// Author-supplied reading time label
    pub read_time: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Plain-text summary of the body
    pub excerpt: String,

    /// Custom front-matter fields
    #[serde(skip_serializing_if = "Metadata::is_empty", default)]
    pub extra: Metadata,
}

impl Post {
    /// Build a post from a parsed document
    pub fn from_parsed(parsed: &ParsedPost, excerpt_length: usize) -> Self {
        let fm = parsed.front_matter();
        Self {
            slug: parsed.slug.clone(),
            title: fm.title.unwrap_or_default(),
            date: fm.date.unwrap_or_default(),
            category: fm.category.unwrap_or_default(),
            description: fm.description.unwrap_or_default(),
            read_time: fm.read_time.unwrap_or_default(),
            tags: fm.tags,
            excerpt: excerpt(&parsed.body, excerpt_length),
            extra: fm.extra,
        }
    }

    /// Get the previous (newer) post in a list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next (older) post in a list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        posts.get(pos + 1)
    }
}

/// A single post with its full markdown content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,

    /// Markdown body without the front-matter
    pub content: String,

    /// Estimated reading time in minutes
    pub reading_minutes: usize,
}

impl PostDetail {
    pub fn from_parsed(parsed: ParsedPost, excerpt_length: usize, words_per_minute: usize) -> Self {
        let post = Post::from_parsed(&parsed, excerpt_length);
        let reading_minutes = reading_minutes(&parsed.body, words_per_minute);
        Self {
            post,
            content: parsed.body,
            reading_minutes,
        }
    }
}

/// Cache partition key: every post, or one named category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    /// Wire name of the catch-all partition
    pub const ALL: &'static str = "all";

    pub fn named(name: impl Into<String>) -> Self {
        Category::Named(name.into())
    }

    /// Whether `post` belongs to this partition
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Category::All => true,
            Category::Named(name) => post.category == *name,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::All => Self::ALL,
            Category::Named(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == Self::ALL {
            Category::All
        } else {
            Category::Named(s.to_string())
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from(s))
    }
}
