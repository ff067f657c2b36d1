//! Document sources - where raw markdown comes from

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Raw markdown text of a single post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub slug: String,
    pub raw: String,
}

impl RawDocument {
    pub fn new(slug: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            raw: raw.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("post not found: {0}")]
    NotFound(String),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to scan posts directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

/// Provider of raw post documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Every document the source knows about
    async fn documents(&self) -> Result<Vec<RawDocument>, SourceError>;

    /// A single document by slug
    async fn document(&self, slug: &str) -> Result<RawDocument, SourceError>;
}

/// Markdown files in a directory tree; the file stem is the slug
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Markdown files under the root, one per slug.
    ///
    /// When several files share a stem the shallowest one wins, `.md` before
    /// `.markdown`; this is the same file `document` resolves first.
    fn markdown_files(&self) -> Result<Vec<PathBuf>, SourceError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry?;
            if entry.path().is_file() && is_markdown_file(entry.path()) {
                files.push((entry.depth(), entry.into_path()));
            }
        }
        files.sort_by(|(depth_a, a), (depth_b, b)| {
            depth_a
                .cmp(depth_b)
                .then_with(|| is_long_extension(a).cmp(&is_long_extension(b)))
                .then_with(|| a.cmp(b))
        });

        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(files.len());
        for (_, path) in files {
            let Some(slug) = slug_of(&path) else {
                continue;
            };
            if seen.insert(slug) {
                unique.push(path);
            } else {
                tracing::warn!("Skipping {:?}: another post already uses its slug", path);
            }
        }
        Ok(unique)
    }

    /// Walk the tree off the async runtime
    async fn scan(&self) -> Result<Vec<PathBuf>, SourceError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.markdown_files())
            .await
            .map_err(|e| SourceError::Io {
                path: self.root.clone(),
                source: std::io::Error::other(e),
            })?
    }
}

#[async_trait]
impl DocumentSource for FsSource {
    async fn documents(&self) -> Result<Vec<RawDocument>, SourceError> {
        if !self.root.exists() {
            tracing::debug!("Posts directory {:?} does not exist", self.root);
            return Ok(Vec::new());
        }

        let files = self.scan().await?;

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            let Some(slug) = slug_of(&path) else {
                continue;
            };
            match tokio::fs::read_to_string(&path).await {
                Ok(raw) => documents.push(RawDocument { slug, raw }),
                Err(e) => {
                    tracing::warn!("Failed to read post {:?}: {}", path, e);
                }
            }
        }

        tracing::debug!("Read {} documents from {:?}", documents.len(), self.root);
        Ok(documents)
    }

    async fn document(&self, slug: &str) -> Result<RawDocument, SourceError> {
        if !is_safe_slug(slug) {
            return Err(SourceError::NotFound(slug.to_string()));
        }

        for ext in ["md", "markdown"] {
            let path = self.root.join(format!("{}.{}", slug, ext));
            match tokio::fs::read_to_string(&path).await {
                Ok(raw) => return Ok(RawDocument::new(slug, raw)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(SourceError::Io { path, source: e }),
            }
        }

        // Posts filed in subdirectories
        if self.root.exists() {
            let nested = self
                .scan()
                .await?
                .into_iter()
                .find(|path| slug_of(path).as_deref() == Some(slug));

            if let Some(path) = nested {
                return match tokio::fs::read_to_string(&path).await {
                    Ok(raw) => Ok(RawDocument::new(slug, raw)),
                    Err(e) => Err(SourceError::Io { path, source: e }),
                };
            }
        }

        Err(SourceError::NotFound(slug.to_string()))
    }
}

/// Documents bundled in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: IndexMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document
    pub fn insert(&mut self, slug: impl Into<String>, raw: impl Into<String>) {
        self.documents.insert(slug.into(), raw.into());
    }

    pub fn with(mut self, slug: impl Into<String>, raw: impl Into<String>) -> Self {
        self.insert(slug, raw);
        self
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn documents(&self) -> Result<Vec<RawDocument>, SourceError> {
        Ok(self
            .documents
            .iter()
            .map(|(slug, raw)| RawDocument::new(slug.clone(), raw.clone()))
            .collect())
    }

    async fn document(&self, slug: &str) -> Result<RawDocument, SourceError> {
        self.documents
            .get(slug)
            .map(|raw| RawDocument::new(slug, raw.clone()))
            .ok_or_else(|| SourceError::NotFound(slug.to_string()))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn is_long_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("markdown")
}

fn slug_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\']) && !slug.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn posts_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("first.md"), "---\ntitle: First\n---\nOne\n").unwrap();
        fs::write(dir.path().join("second.markdown"), "Second\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/third.md"), "Third\n").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_fs_documents() {
        let dir = posts_dir();
        let source = FsSource::new(dir.path());

        let docs = source.documents().await.unwrap();
        let mut slugs: Vec<_> = docs.iter().map(|d| d.slug.as_str()).collect();
        slugs.sort();
        assert_eq!(slugs, ["first", "second", "third"]);

        let first = docs.iter().find(|d| d.slug == "first").unwrap();
        assert_eq!(first.raw, "---\ntitle: First\n---\nOne\n");
    }

    #[tokio::test]
    async fn test_fs_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let source = FsSource::new(dir.path().join("nope"));
        assert!(source.documents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fs_document_by_slug() {
        let dir = posts_dir();
        let source = FsSource::new(dir.path());

        assert_eq!(source.document("first").await.unwrap().raw, "---\ntitle: First\n---\nOne\n");
        assert_eq!(source.document("second").await.unwrap().raw, "Second\n");
        assert_eq!(source.document("third").await.unwrap().raw, "Third\n");

        let err = source.document("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(source.document("../first").await.unwrap_err().is_not_found());
        assert!(source.document("").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_fs_duplicate_slug_keeps_shallowest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.md"), "top\n").unwrap();
        fs::create_dir(dir.path().join("2023")).unwrap();
        fs::write(dir.path().join("2023/hello.md"), "nested\n").unwrap();
        fs::write(dir.path().join("notes.markdown"), "long\n").unwrap();
        fs::write(dir.path().join("notes.md"), "short\n").unwrap();
        let source = FsSource::new(dir.path());

        let docs = source.documents().await.unwrap();
        let hello: Vec<_> = docs.iter().filter(|d| d.slug == "hello").collect();
        assert_eq!(hello.len(), 1);
        assert_eq!(hello[0].raw, "top\n");
        let notes: Vec<_> = docs.iter().filter(|d| d.slug == "notes").collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].raw, "short\n");
        assert_eq!(docs.len(), 2);

        assert_eq!(source.document("hello").await.unwrap().raw, "top\n");
        assert_eq!(source.document("notes").await.unwrap().raw, "short\n");
    }

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemorySource::new().with("b", "B").with("a", "A");
        let docs = source.documents().await.unwrap();
        assert_eq!(docs, vec![RawDocument::new("b", "B"), RawDocument::new("a", "A")]);
        assert_eq!(source.document("a").await.unwrap().raw, "A");
        assert!(source.document("c").await.unwrap_err().is_not_found());
    }
}
