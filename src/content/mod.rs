//! Content module - handles posts, front-matter, and document sources

mod excerpt;
mod frontmatter;
pub mod loader;
mod post;
pub mod source;

pub use excerpt::{excerpt, strip_markdown, DEFAULT_EXCERPT_LENGTH};
pub use frontmatter::{parse, parse_front_matter, FrontMatter, MetaValue, Metadata, ParsedPost};
pub use loader::ContentLoader;
pub use post::{Category, Post, PostDetail};
pub use source::{DocumentSource, FsSource, MemorySource, RawDocument, SourceError};
