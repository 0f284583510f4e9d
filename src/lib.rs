//! blog-rs: a small file-backed personal blog
//!
//! Posts are markdown files with a YAML header, one per slug, kept in a
//! single directory. The [`content::PostStore`] owns those files, and the
//! [`service::ContentService`] validates requests on top of it for both
//! the HTTP server and the CLI.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod server;
pub mod service;

use anyhow::Result;
use std::path::Path;

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Directory holding post files
    pub posts_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self { config, posts_dir })
    }

    /// Open the post store, creating its directory on first use
    pub fn store(&self) -> Result<content::PostStore> {
        Ok(content::PostStore::open(&self.posts_dir)?)
    }

    /// Content service over this blog's post store
    pub fn service(&self) -> Result<service::ContentService> {
        Ok(service::ContentService::new(self.store()?))
    }
}
