//! List stored posts

use anyhow::Result;

use crate::Blog;

/// Print every post, newest first
pub fn run(blog: &Blog) -> Result<()> {
    let posts = blog.service()?.list()?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        let date = post
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let tags = if post.tags.is_empty() {
            String::new()
        } else {
            format!(" #{}", post.tags.join(" #"))
        };
        println!(
            "  {} {} {} [{}]{}",
            date, post.cover_emoji, post.title, post.slug, tags
        );
    }

    Ok(())
}
