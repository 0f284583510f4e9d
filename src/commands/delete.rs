//! Delete a post

use anyhow::Result;

use crate::service::DeleteRequest;
use crate::Blog;

/// Remove a post permanently
pub fn run(blog: &Blog, slug: &str) -> Result<()> {
    blog.service()?.delete(DeleteRequest {
        slug: Some(slug.to_string()),
    })?;
    println!("Deleted: {}", slug);
    Ok(())
}
