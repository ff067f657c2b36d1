//! Content loader - turns raw documents into sorted posts

use std::cmp::Ordering;
use std::sync::Arc;

use super::excerpt::DEFAULT_EXCERPT_LENGTH;
use super::source::{DocumentSource, SourceError};
use super::{Category, ParsedPost, Post, PostDetail};
use crate::helpers::date::{parse_date, DEFAULT_READING_WPM};

/// Loads posts from a document source
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn DocumentSource>,
    excerpt_length: usize,
    words_per_minute: usize,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self {
            source,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            words_per_minute: DEFAULT_READING_WPM,
        }
    }

    pub fn with_excerpt_length(mut self, excerpt_length: usize) -> Self {
        self.excerpt_length = excerpt_length;
        self
    }

    pub fn with_reading_wpm(mut self, words_per_minute: usize) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    /// Load the posts of `category`, newest first
    pub async fn load_posts(&self, category: &Category) -> Result<Vec<Post>, SourceError> {
        let documents = self.source.documents().await?;

        let mut posts: Vec<Post> = documents
            .iter()
            .map(|doc| {
                let parsed = ParsedPost::parse(&doc.slug, &doc.raw);
                Post::from_parsed(&parsed, self.excerpt_length)
            })
            .filter(|post| category.matches(post))
            .collect();

        sort_by_date_desc(&mut posts);

        tracing::debug!("Loaded {} posts for category {}", posts.len(), category);
        Ok(posts)
    }

    /// Load a single post with its full content
    pub async fn load_post(&self, slug: &str) -> Result<PostDetail, SourceError> {
        let doc = self.source.document(slug).await?;
        let parsed = ParsedPost::parse(doc.slug, &doc.raw);
        Ok(PostDetail::from_parsed(
            parsed,
            self.excerpt_length,
            self.words_per_minute,
        ))
    }
}

/// Sort by date descending (newest first).
///
/// Posts whose date parses come first. The rest follow in descending order
/// of their raw date text.
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| compare_dates_desc(&a.date, &b.date));
}

fn compare_dates_desc(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    }
}
