//! Watch the posts directory and re-list on changes

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::cache::PostCache;
use crate::content::Category;
use crate::Grove;

/// List `category`, then list it again whenever a post changes
pub async fn run(grove: &Grove, cache: &PostCache, category: &Category) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<DebounceEventResult>();

    // Create debouncer to avoid multiple rapid reloads
    let mut debouncer = new_debouncer(Duration::from_millis(500), move |res: DebounceEventResult| {
        let _ = tx.send(res);
    })?;

    if grove.posts_dir.exists() {
        debouncer
            .watcher()
            .watch(&grove.posts_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", grove.posts_dir);
    } else {
        tracing::warn!(
            "Posts directory {:?} does not exist, nothing to watch",
            grove.posts_dir
        );
    }

    super::list::run(cache, category, false).await?;
    println!("\nWatching for changes. Press Ctrl+C to stop.");

    while let Some(res) = rx.recv().await {
        match res {
            Ok(events) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant(&e.path))
                    .collect();

                if changed.is_empty() {
                    continue;
                }

                println!();
                for event in &changed {
                    println!("File changed: {}", event.path.display());
                }

                // Any post may have moved category, so every entry goes
                cache.clear_all();
                if let Err(e) = super::list::run(cache, category, false).await {
                    tracing::error!("Reload failed: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}

/// Whether a change to `path` can affect the post list
pub fn is_relevant(path: &Path) -> bool {
    let hidden = path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| s.starts_with('.') && s != "." && s != "..")
            .unwrap_or(false)
    });
    if hidden {
        return false;
    }

    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.ends_with('~') {
        return false;
    }

    // Deleted directories have no extension but still drop posts
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("markdown") | None
    )
}
