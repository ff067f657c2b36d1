//! CLI commands

pub mod list;
pub mod search;
pub mod show;
pub mod stats;
pub mod watch;
