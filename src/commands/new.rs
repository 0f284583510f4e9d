//! Create a new post

use anyhow::Result;
use std::path::Path;

use super::read_body;
use crate::service::CreateRequest;
use crate::Blog;

/// Create a post and return its slug
pub fn create_post(
    blog: &Blog,
    title: &str,
    content: Option<String>,
    file: Option<&Path>,
    tags: Vec<String>,
    emoji: Option<String>,
) -> Result<String> {
    let content = read_body(content, file)?;

    let created = blog.service()?.create(CreateRequest {
        title: Some(title.to_string()),
        content,
        tags: Some(tags),
        cover_emoji: emoji,
    })?;

    let path = blog.posts_dir.join(format!("{}.md", created.slug));
    println!("Created: {:?}", path);

    Ok(created.slug)
}
