//! Content module - post records, their on-disk encoding, and the post store

pub mod excerpt;
mod frontmatter;
mod markdown;
mod post;
pub mod slug;
pub mod store;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{NewPost, Post, PostSummary, PostUpdate, DEFAULT_COVER_EMOJI, DEFAULT_TITLE};
pub use store::PostStore;
