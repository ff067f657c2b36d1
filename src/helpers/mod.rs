//! Helper functions shared by the commands
//!
//! Date formatting, relative time, reading time, and the list/search
//! operations the blog views run over an already loaded post list.

pub mod date;
pub mod list;

pub use date::{format_date, parse_date, reading_minutes, relative_date_from};
pub use list::{count_categories, count_tags, posts_with_tag, search_posts};
