//! Blog configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::content::DEFAULT_EXCERPT_LENGTH;
use crate::helpers::date::DEFAULT_READING_WPM;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    /// Day the blog started, used for the "running for N days" line
    pub start_date: Option<String>,

    // Content
    pub posts_dir: String,
    pub excerpt_length: usize,
    pub reading_wpm: usize,

    #[serde(default)]
    pub cache: CacheConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Grove".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),
            start_date: None,

            posts_dir: "content/posts".to_string(),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            reading_wpm: DEFAULT_READING_WPM,

            cache: CacheConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Post cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub min_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            min_delay_ms: 200,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }
}
