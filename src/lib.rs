//! grove: the content core of the Grove blog
//!
//! Reads markdown posts with a `---` front-matter block, turns them into
//! presentation-ready posts with plain-text excerpts, and keeps per-category
//! post lists in a TTL cache shared by everything that displays them.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cache::PostCache;
use content::{ContentLoader, FsSource};

/// The blog application
#[derive(Clone)]
pub struct Grove {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the markdown posts
    pub posts_dir: PathBuf,
}

impl Grove {
    /// Create a new Grove instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Loader reading from the posts directory
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(Arc::new(FsSource::new(&self.posts_dir)))
            .with_excerpt_length(self.config.excerpt_length)
            .with_reading_wpm(self.config.reading_wpm)
    }

    /// A fresh post cache configured from `_config.yml`
    pub fn post_cache(&self) -> Arc<PostCache> {
        Arc::new(
            PostCache::new(self.loader())
                .with_ttl(self.config.cache.ttl())
                .with_min_delay(self.config.cache.min_delay()),
        )
    }
}
