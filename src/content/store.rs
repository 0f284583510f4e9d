//! Post store - one markdown file per post, keyed by slug
//!
//! Each post lives at `<dir>/<slug>.md` in the encoding described in
//! [`FrontMatter`]. The store performs no locking: two writers touching
//! the same slug race, and the last rename wins.

use chrono::{Local, NaiveDate};
use std::cmp::Ordering;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::excerpt::excerpt;
use super::frontmatter::FrontMatter;
use super::post::{cover_or_default, NewPost, Post, PostSummary, PostUpdate, DEFAULT_TITLE};
use super::slug;
use crate::error::{BlogError, Result};

/// File extension for stored posts
pub const EXTENSION: &str = "md";

/// File-backed post storage
#[derive(Debug, Clone)]
pub struct PostStore {
    dir: PathBuf,
}

impl PostStore {
    /// Open the store, creating the directory if it does not exist yet
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            BlogError::storage(format!("cannot create posts directory {:?}: {}", dir, e))
        })?;
        tracing::debug!("Post store at {:?}", dir);
        Ok(Self { dir })
    }

    /// Directory holding the post files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List every readable post, newest first.
    ///
    /// Records that cannot be read or decoded are skipped with a warning.
    /// Posts without a usable date sort after all dated posts; equal dates
    /// fall back to slug order.
    pub fn list_posts(&self) -> Result<Vec<PostSummary>> {
        // Surface an unreadable directory instead of an empty listing
        fs::read_dir(&self.dir)?;

        let mut posts = Vec::new();

        // Follow links so listing agrees with get_post, which reads through them
        for entry in WalkDir::new(&self.dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", self.dir, e);
                    continue;
                }
            };
            let path = entry.path();
            let Some(slug) = record_slug(path) else {
                continue;
            };
            if !entry.file_type().is_file() {
                continue;
            }

            match self.read_record(&slug, path) {
                Ok(post) => posts.push(post.summary()),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        posts.sort_by(|a, b| newest_first(a.date, b.date).then_with(|| a.slug.cmp(&b.slug)));

        Ok(posts)
    }

    /// Fetch one post with its body; `Ok(None)` if there is no such slug
    pub fn get_post(&self, slug: &str) -> Result<Option<Post>> {
        let Some(path) = self.existing_path(slug) else {
            return Ok(None);
        };
        match self.read_record(slug, &path) {
            Ok(post) => Ok(Some(post)),
            // Deleted between the existence check and the read
            Err(BlogError::Storage(_)) if !path.exists() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Store a new post and return its generated slug
    pub fn create_post(&self, fields: NewPost) -> Result<String> {
        require(&fields.title, "Title and content are required.")?;
        require(&fields.content, "Title and content are required.")?;

        let slug = slug::generate(&fields.title);
        let path = self.path_for(&slug);
        if path.exists() {
            return Err(BlogError::storage(format!(
                "a post with slug {} already exists",
                slug
            )));
        }

        let fm = FrontMatter {
            title: fields.title,
            date: Some(today_string()),
            excerpt: excerpt(&fields.content),
            tags: fields.tags.unwrap_or_default(),
            cover_emoji: cover_or_default(fields.cover_emoji.as_deref()),
        };
        self.write_record(&path, &fm, &fields.content, false)?;

        tracing::info!("Created post {}", slug);
        Ok(slug)
    }

    /// Rewrite an existing post, keeping its slug
    pub fn update_post(&self, slug: &str, fields: PostUpdate) -> Result<String> {
        let path = self
            .existing_path(slug)
            .ok_or_else(|| BlogError::not_found(slug))?;
        require(&fields.content, "Content is required.")?;

        let title = match fields.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => DEFAULT_TITLE.to_string(),
        };
        let fm = FrontMatter {
            title,
            date: Some(today_string()),
            excerpt: excerpt(&fields.content),
            tags: fields.tags.unwrap_or_default(),
            cover_emoji: cover_or_default(fields.cover_emoji.as_deref()),
        };
        self.write_record(&path, &fm, &fields.content, true)?;

        tracing::info!("Updated post {}", slug);
        Ok(slug.to_string())
    }

    /// Remove a post permanently
    pub fn delete_post(&self, slug: &str) -> Result<()> {
        let path = self
            .existing_path(slug)
            .ok_or_else(|| BlogError::not_found(slug))?;

        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(BlogError::not_found(slug));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!("Deleted post {}", slug);
        Ok(())
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", slug, EXTENSION))
    }

    /// Path of the record for `slug`, if the slug is well-formed and stored
    fn existing_path(&self, slug: &str) -> Option<PathBuf> {
        if !slug::is_valid(slug) {
            return None;
        }
        let path = self.path_for(slug);
        path.is_file().then_some(path)
    }

    fn read_record(&self, slug: &str, path: &Path) -> Result<Post> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw)?;
        let date = fm.parse_date();
        if date.is_none() && fm.date.is_some() {
            tracing::debug!("Post {} has an unparsable date {:?}", slug, fm.date);
        }

        Ok(Post {
            slug: slug.to_string(),
            title: fm.title,
            date,
            excerpt: fm.excerpt,
            tags: fm.tags,
            cover_emoji: fm.cover_emoji,
            content: body.to_string(),
        })
    }

    /// Write through a unique hidden temp file so readers never see a
    /// partial record. Without `replace` an existing record is left alone.
    fn write_record(
        &self,
        path: &Path,
        fm: &FrontMatter,
        body: &str,
        replace: bool,
    ) -> Result<()> {
        let encoded = fm.render(body)?;
        let failed =
            |e: io::Error| BlogError::storage(format!("failed to write {:?}: {}", path, e));

        let mut tmp = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(failed)?;
        tmp.write_all(encoded.as_bytes()).map_err(failed)?;
        tmp.as_file().sync_all().map_err(failed)?;

        // The temp file is removed on drop if it never gets renamed
        let persisted = if replace {
            tmp.persist(path)
        } else {
            tmp.persist_noclobber(path)
        };
        persisted.map_err(|e| failed(e.error))?;

        tracing::debug!("Wrote {:?} ({} bytes)", path, encoded.len());
        Ok(())
    }
}

/// Slug for a directory entry if it looks like a post file
fn record_slug(path: &Path) -> Option<String> {
    let is_markdown = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e == EXTENSION)
        .unwrap_or(false);
    if !is_markdown {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    slug::is_valid(stem).then(|| stem.to_string())
}

/// Order dates newest first, with missing dates last
fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(BlogError::validation(message))
    } else {
        Ok(())
    }
}

/// Today's local date as stored in the header
fn today_string() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// Today's local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
