//! CLI commands, each a thin caller of the content service

pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod show;

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Post body from either an inline string or a file
pub(crate) fn read_body(content: Option<String>, file: Option<&Path>) -> Result<Option<String>> {
    match (content, file) {
        (Some(_), Some(_)) => bail!("Use either --content or --file, not both"),
        (Some(content), None) => Ok(Some(content)),
        (None, Some(path)) => {
            let body = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            Ok(Some(body))
        }
        (None, None) => Ok(None),
    }
}
