//! Post cache
//!
//! Keeps the sorted post list of each category in memory for a fixed TTL so
//! that views mounted at the same time, or revisited shortly after, do not
//! reload every document. A stale or invalidated entry is refetched in full;
//! entries are never patched in place.
//!
//! Concurrent misses on the same category are not collapsed: each caller
//! loads independently and the last one to finish overwrites the entry.
//! A load that started before `invalidate` or `clear_all` and finishes after
//! it stores its result with its own start time, so it can be served again.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::content::{Category, ContentLoader, Post, PostDetail, SourceError};

/// How long a loaded category stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Minimum latency of a cache hit, so loading placeholders do not flicker
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(200);

/// Source of the current time for freshness checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cached posts of one category
#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    /// Sorted posts, `None` until the first successful load
    pub posts: Option<Arc<Vec<Post>>>,
    /// Time of the last successful load (epoch when unpopulated)
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry can be served at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if self.posts.is_none() {
            return false;
        }
        let age_ms = now.signed_duration_since(self.fetched_at).num_milliseconds();
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        age_ms < ttl_ms
    }
}

/// Per-category post cache shared by every view
pub struct PostCache {
    loader: ContentLoader,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    min_delay: Duration,
    entries: Mutex<HashMap<Category, CacheEntry>>,
}

impl PostCache {
    /// Create a cache with the default TTL and minimum delay
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            loader,
            clock: Arc::new(SystemClock),
            ttl: DEFAULT_TTL,
            min_delay: DEFAULT_MIN_DELAY,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Delay applied to cache hits; zero disables it
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Posts of `category`, newest first.
    ///
    /// Served from memory while fresh; otherwise reloaded and stored. A
    /// failed load leaves the entry as it was and is retried on the next call.
    pub async fn get_posts(&self, category: &Category) -> Result<Arc<Vec<Post>>, SourceError> {
        let now = self.clock.now();

        if let Some(posts) = self.fresh(category, now) {
            tracing::debug!("Cache hit for category {}", category);
            if !self.min_delay.is_zero() {
                tokio::time::sleep(self.min_delay).await;
            }
            return Ok(posts);
        }

        tracing::debug!("Cache miss for category {}, loading posts", category);
        let posts = match self.loader.load_posts(category).await {
            Ok(posts) => Arc::new(posts),
            Err(e) => {
                tracing::warn!("Failed to load posts for category {}: {}", category, e);
                return Err(e);
            }
        };

        self.entries().insert(
            category.clone(),
            CacheEntry {
                posts: Some(Arc::clone(&posts)),
                fetched_at: now,
            },
        );

        Ok(posts)
    }

    /// A single post with its content; not cached
    pub async fn get_post(&self, slug: &str) -> Result<PostDetail, SourceError> {
        self.loader.load_post(slug).await.inspect_err(|e| {
            if e.is_not_found() {
                tracing::debug!("Post not found: {}", slug);
            } else {
                tracing::warn!("Failed to load post {}: {}", slug, e);
            }
        })
    }

    /// Force the next `get_posts(category)` to reload
    pub fn invalidate(&self, category: &Category) {
        tracing::debug!("Invalidating cache for category {}", category);
        self.entries()
            .insert(category.clone(), CacheEntry::default());
    }

    /// Force every category to reload
    pub fn clear_all(&self) {
        tracing::debug!("Clearing post cache");
        for entry in self.entries().values_mut() {
            *entry = CacheEntry::default();
        }
    }

    /// Snapshot of the entry for `category`, if one was ever created
    pub fn entry(&self, category: &Category) -> Option<CacheEntry> {
        self.entries().get(category).cloned()
    }

    fn fresh(&self, category: &Category, now: DateTime<Utc>) -> Option<Arc<Vec<Post>>> {
        let entries = self.entries();
        let entry = entries.get(category)?;
        if entry.is_fresh(now, self.ttl) {
            entry.posts.clone()
        } else {
            None
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Category, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
