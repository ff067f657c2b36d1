//! Plain-text excerpts from markdown bodies

use lazy_static::lazy_static;
use regex::Regex;

/// Excerpt length used when the site config does not override it
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

const ELLIPSIS: &str = "...";

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"```[\s\S]*?```").expect("valid regex");
    static ref HEADING: Regex = Regex::new(r"(?m)^[ \t]*#{1,6}\s").expect("valid regex");
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`]*`").expect("valid regex");
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]*)\*\*").expect("valid regex");
    static ref ITALIC: Regex = Regex::new(r"\*([^*]*)\*").expect("valid regex");
    static ref LINK: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid regex");
    static ref NEWLINES: Regex = Regex::new(r"(?:\r?\n)+").expect("valid regex");
}

/// Strip markdown syntax from `body`, leaving readable text on one line
pub fn strip_markdown(body: &str) -> String {
    let text = CODE_FENCE.replace_all(body, "");
    let text = HEADING.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = NEWLINES.replace_all(&text, " ");
    text.trim().to_string()
}

/// Build an excerpt of at most `max_len` characters plus `"..."`.
///
/// The cut is made on character boundaries, not words.
pub fn excerpt(body: &str, max_len: usize) -> String {
    let clean = strip_markdown(body);
    if clean.chars().count() <= max_len {
        return clean;
    }

    let mut cut: String = clean.chars().take(max_len).collect();
    cut.push_str(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_unchanged() {
        assert_eq!(excerpt("Hello there.", 150), "Hello there.");
    }

    #[test]
    fn test_strips_headings_and_emphasis() {
        let body = "# Title\n\nSome **bold** and *italic* text.\n## Sub\nMore.";
        assert_eq!(
            excerpt(body, 150),
            "Title Some bold and italic text. Sub More."
        );
    }

    #[test]
    fn test_drops_code() {
        let body = "Before\n```rust\nfn main() {}\n```\nafter `inline()` end";
        assert_eq!(excerpt(body, 150), "Before after  end");
    }

    #[test]
    fn test_links_keep_label() {
        let body = "Read [the docs](https://docs.rs) today.";
        assert_eq!(excerpt(body, 150), "Read the docs today.");
    }

    #[test]
    fn test_hash_inside_text_survives() {
        assert_eq!(excerpt("Issue #42 is fixed", 150), "Issue #42 is fixed");
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        let body = "a".repeat(200);
        let out = excerpt(&body, 150);
        assert_eq!(out.len(), 153);
        assert!(out.ends_with("..."));
        assert_eq!(&out[..150], &body[..150]);
    }

    #[test]
    fn test_exact_length_not_truncated() {
        let body = "b".repeat(150);
        assert_eq!(excerpt(&body, 150), body);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let body = "가".repeat(10);
        assert_eq!(excerpt(&body, 10), body);
        let out = excerpt(&body, 4);
        assert_eq!(out, "가가가가...");
    }

    #[test]
    fn test_never_longer_than_limit_plus_ellipsis() {
        let body = "## Heading\n\nword ".repeat(80);
        for max in [0, 1, 10, 150] {
            assert!(excerpt(&body, max).chars().count() <= max + 3);
        }
    }
}
