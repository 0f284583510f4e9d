//! Post models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Title used when a stored post has none
pub const DEFAULT_TITLE: &str = "Untitled";

/// Cover glyph used when none is given
pub const DEFAULT_COVER_EMOJI: &str = "📝";

/// A blog post, including its markdown body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique key, also the file stem on disk
    pub slug: String,

    /// Post title
    pub title: String,

    /// Last write date; `None` when the stored value is missing or unparsable
    pub date: Option<NaiveDate>,

    /// Plain-text preview derived from the body
    pub excerpt: String,

    /// Post tags, in the order given
    pub tags: Vec<String>,

    /// Single display glyph
    pub cover_emoji: String,

    /// Raw markdown body
    pub content: String,
}

impl Post {
    /// Drop the body, keeping only listing metadata
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            date: self.date,
            excerpt: self.excerpt.clone(),
            tags: self.tags.clone(),
            cover_emoji: self.cover_emoji.clone(),
        }
    }
}

/// Listing entry for a post (no body)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub cover_emoji: String,
}

/// Caller-supplied fields for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub cover_emoji: Option<String>,
}

/// Caller-supplied fields for rewriting an existing post.
///
/// Absent fields fall back to their defaults rather than keeping the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub cover_emoji: Option<String>,
}

/// Resolve an optional cover glyph to the stored value
pub(crate) fn cover_or_default(cover_emoji: Option<&str>) -> String {
    match cover_emoji {
        Some(emoji) if !emoji.trim().is_empty() => emoji.to_string(),
        _ => DEFAULT_COVER_EMOJI.to_string(),
    }
}
