//! The club news feed.

pub mod news;

pub use news::{News, NewsDraft, NewsPatch};
