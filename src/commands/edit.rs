//! Rewrite an existing post

use anyhow::Result;
use std::path::Path;

use super::read_body;
use crate::service::UpdateRequest;
use crate::Blog;

/// Replace a post's fields, keeping its slug.
///
/// Fields not given fall back to their defaults, as with the HTTP API.
pub fn run(
    blog: &Blog,
    slug: &str,
    title: Option<String>,
    content: Option<String>,
    file: Option<&Path>,
    tags: Vec<String>,
    emoji: Option<String>,
) -> Result<()> {
    let content = read_body(content, file)?;

    let updated = blog.service()?.update(UpdateRequest {
        slug: Some(slug.to_string()),
        title,
        content,
        tags: Some(tags),
        cover_emoji: emoji,
    })?;

    println!("Updated: {}", updated.slug);
    Ok(())
}
