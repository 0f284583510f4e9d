//! Print one post

use anyhow::Result;

use crate::Blog;

/// Print a post's metadata followed by its markdown body
pub fn run(blog: &Blog, slug: &str) -> Result<()> {
    let post = blog.service()?.get(slug)?;

    println!("{} {}", post.cover_emoji, post.title);
    if let Some(date) = post.date {
        println!("Date: {}", date.format("%Y-%m-%d"));
    }
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    println!("Slug: {}", post.slug);
    println!();
    println!("{}", post.content);

    Ok(())
}
