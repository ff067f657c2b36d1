//! Front-matter parsing
//!
//! Posts start with a `---` fenced block of `key: value` lines. The parser is
//! line oriented: it understands plain values, quoted values and bracketed
//! lists, and nothing else. Anything it cannot make sense of is skipped, so
//! parsing never fails.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref FRONT_MATTER: Regex =
        Regex::new(r"^---\s*\n([\s\S]*?)\n---\s*\n([\s\S]*)$").expect("valid front-matter regex");
}

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    /// Flatten to a single string, joining list items with `", "`
    pub fn to_text(&self) -> String {
        match self {
            MetaValue::Text(s) => s.clone(),
            MetaValue::List(items) => items.join(", "),
        }
    }

    /// Widen to a list; a plain value becomes a one-element list
    pub fn to_list(&self) -> Vec<String> {
        match self {
            MetaValue::Text(s) => vec![s.clone()],
            MetaValue::List(items) => items.clone(),
        }
    }
}

/// Front-matter key/value pairs in source order
pub type Metadata = IndexMap<String, MetaValue>;

/// A raw document split into metadata and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPost {
    pub slug: String,
    pub metadata: Metadata,
    pub body: String,
}

impl ParsedPost {
    /// Parse a raw document identified by `slug`
    pub fn parse(slug: impl Into<String>, raw: &str) -> Self {
        let (metadata, body) = parse_front_matter(raw);
        Self {
            slug: slug.into(),
            metadata,
            body: body.to_string(),
        }
    }

    /// Typed view over the metadata
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter::from_metadata(&self.metadata)
    }
}

/// Split `raw` into its front-matter and body.
///
/// The block must start at the very first byte and ends at the first closing
/// `---` line. Without one, the metadata is empty and the body is `raw`.
pub fn parse_front_matter(raw: &str) -> (Metadata, &str) {
    let Some(caps) = FRONT_MATTER.captures(raw) else {
        return (Metadata::new(), raw);
    };

    let (Some(block), Some(body)) = (caps.get(1), caps.get(2)) else {
        return (Metadata::new(), raw);
    };

    let mut metadata = Metadata::new();
    for line in block.as_str().lines() {
        if let Some((key, value)) = parse_line(line) {
            metadata.insert(key, value);
        }
    }

    (metadata, body.as_str())
}

fn parse_line(line: &str) -> Option<(String, MetaValue)> {
    let colon = line.find(':')?;
    if colon == 0 {
        return None;
    }

    let key = line[..colon].trim();
    if key.is_empty() {
        return None;
    }

    let value = strip_quotes(line[colon + 1..].trim());
    let value = match value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        Some(inner) => MetaValue::List(parse_list(inner)),
        None => MetaValue::Text(value.to_string()),
    };

    Some((key.to_string(), value))
}

fn parse_list(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|item| strip_quotes(item.trim()).to_string())
        .collect()
}

/// Remove one layer of matching `"` or `'` quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Front-matter fields the blog knows about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// The `readTime` key
    pub read_time: Option<String>,
    pub tags: Vec<String>,

    /// Additional custom fields
    pub extra: Metadata,
}

impl FrontMatter {
    /// Sort raw metadata into known fields and the residual `extra` map
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let mut fm = FrontMatter::default();

        for (key, value) in metadata {
            match key.as_str() {
                "title" => fm.title = Some(value.to_text()),
                "date" => fm.date = Some(value.to_text()),
                "category" => fm.category = Some(value.to_text()),
                "description" => fm.description = Some(value.to_text()),
                "readTime" => fm.read_time = Some(value.to_text()),
                "tags" => fm.tags = value.to_list(),
                _ => {
                    fm.extra.insert(key.clone(), value.clone());
                }
            }
        }

        fm
    }
}

/// Parse a raw document; shorthand for [`ParsedPost::parse`]
pub fn parse(slug: impl Into<String>, raw: &str) -> ParsedPost {
    ParsedPost::parse(slug, raw)
}
