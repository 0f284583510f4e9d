//! Slug generation for new posts

use lazy_static::lazy_static;
use regex::Regex;

/// Number of random hex characters appended to every slug
pub const SUFFIX_LENGTH: usize = 8;

/// Base used when a title has no usable characters
const FALLBACK_BASE: &str = "untitled";

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-+").unwrap();
}

/// Turn a title into the readable part of a slug.
///
/// Lower-cases, drops anything outside `[a-z0-9]`, whitespace and `-`,
/// then turns whitespace runs into single hyphens.
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let kept = DISALLOWED.replace_all(lower.trim(), "");
    let hyphenated = WHITESPACE.replace_all(kept.trim(), "-");
    HYPHENS.replace_all(&hyphenated, "-").into_owned()
}

/// Build a fresh slug for a post title.
///
/// The random suffix keeps duplicate titles apart. A suffix collision is
/// not retried; the store refuses to overwrite instead.
pub fn generate(title: &str) -> String {
    let base = slugify(title);
    let base = if base.trim_matches('-').is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        base
    };
    format!("{}-{}", base, random_suffix())
}

fn random_suffix() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(SUFFIX_LENGTH);
    id
}

/// Whether a slug can safely name a file inside the posts directory
pub fn is_valid(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
}
