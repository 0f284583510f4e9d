//! Front-matter encoding for stored posts
//!
//! A record on disk is a YAML header between two `---` lines followed by
//! the markdown body, verbatim:
//!
//! ```text
//! ---
//! title: Hello World
//! date: 2024-01-15
//! excerpt: Hi Body text.
//! tags:
//! - intro
//! coverEmoji: 🚀
//! ---
//! # Hi
//! Body text.
//! ```
//!
//! Everything after the first closing `---` line belongs to the body, so
//! body text that looks like header syntax is never re-read as metadata.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::post::{DEFAULT_COVER_EMOJI, DEFAULT_TITLE};
use crate::error::{BlogError, Result};

const DELIMITER: &str = "---";

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_cover_emoji() -> String {
    DEFAULT_COVER_EMOJI.to_string()
}

/// Header block of a stored post.
///
/// Unknown keys are ignored when reading and are not written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    #[serde(rename = "coverEmoji", default = "default_cover_emoji")]
    pub cover_emoji: String,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: default_title(),
            date: None,
            excerpt: String::new(),
            tags: Vec::new(),
            cover_emoji: default_cover_emoji(),
        }
    }
}

impl FrontMatter {
    /// Split a stored record into its header and body.
    ///
    /// A record without an opening `---` line is all body. An opening
    /// line without a closing one, or a header that is not valid YAML for
    /// this struct, is an error.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let Some(rest) = strip_delimiter_line(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let (yaml, body) = split_at_closing(rest)
            .ok_or_else(|| BlogError::storage("front-matter has no closing delimiter"))?;

        // An empty header decodes as YAML null; treat it as all defaults
        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml)?;
        Ok((fm, body))
    }

    /// Encode a header and body into the stored form
    pub fn render(&self, body: &str) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        let mut out = String::with_capacity(yaml.len() + body.len() + 8);
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(&yaml);
        if !yaml.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(body);
        Ok(out)
    }

    /// Parse the date string into a calendar date
    pub fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// If `s` starts with a `---` line, return what follows it
fn strip_delimiter_line(s: &str) -> Option<&str> {
    let rest = s.strip_prefix(DELIMITER)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Find the first line that is exactly `---` and split around it
fn split_at_closing(s: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in s.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        if bare == DELIMITER {
            return Some((&s[..offset], &s[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse a date string in the formats posts are likely to carry
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // Try RFC 3339 / ISO 8601
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrontMatter {
        FrontMatter {
            title: "Hello World".to_string(),
            date: Some("2024-01-15".to_string()),
            excerpt: "Hi Body text.".to_string(),
            tags: vec!["intro".to_string(), "rust".to_string()],
            cover_emoji: "🚀".to_string(),
        }
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
excerpt: Hi
tags:
  - rust
  - blog
coverEmoji: 🚀
---
This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Hello World");
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert_eq!(fm.cover_emoji, "🚀");
        assert_eq!(fm.parse_date(), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_round_trip_preserves_body() {
        let fm = sample();
        let body = "# Hi\nBody text.";
        let encoded = fm.render(body).unwrap();

        let (decoded, decoded_body) = FrontMatter::parse(&encoded).unwrap();
        assert_eq!(decoded, fm);
        assert_eq!(decoded_body, body);
    }

    #[test]
    fn test_body_that_looks_like_header() {
        let fm = sample();
        let body = "title: not the title\n---\ndate: 1999-01-01\ntags: [x]\n---\n";
        let encoded = fm.render(body).unwrap();

        let (decoded, decoded_body) = FrontMatter::parse(&encoded).unwrap();
        assert_eq!(decoded.title, "Hello World");
        assert_eq!(decoded.date.as_deref(), Some("2024-01-15"));
        assert_eq!(decoded_body, body);
    }

    #[test]
    fn test_awkward_header_values_round_trip() {
        let fm = FrontMatter {
            title: "---\nkey: value # not a comment".to_string(),
            date: Some("2024-01-15".to_string()),
            excerpt: "\"quoted\" and 'single' …".to_string(),
            tags: vec!["a: b".to_string(), "- dash".to_string(), "".to_string()],
            cover_emoji: "🧪".to_string(),
        };
        let body = "\n\nleading blank lines and trailing spaces   ";
        let encoded = fm.render(body).unwrap();

        let (decoded, decoded_body) = FrontMatter::parse(&encoded).unwrap();
        assert_eq!(decoded, fm);
        assert_eq!(decoded_body, body);
    }

    #[test]
    fn test_empty_tags_written_as_list() {
        let fm = FrontMatter {
            tags: Vec::new(),
            ..sample()
        };
        let encoded = fm.render("body").unwrap();
        assert!(encoded.contains("tags: []"));
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single Tag Post\ntags: Notes\n---\nContent here.\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let content = "---\nfoo: bar\n---\nbody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, DEFAULT_TITLE);
        assert_eq!(fm.cover_emoji, DEFAULT_COVER_EMOJI);
        assert!(fm.tags.is_empty());
        assert_eq!(fm.date, None);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_no_frontmatter_is_all_body() {
        let content = "# Just a heading\n\nSome body text.";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Windows");
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_unclosed_header_is_error() {
        let content = "---\ntitle: Never closed\nbody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unterminated\n---\nbody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        for raw in [
            "2024-01-15",
            "2024/01/15",
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00",
            "2024-01-15T10:30:00.000Z",
        ] {
            assert_eq!(parse_date_string(raw), expected, "{}", raw);
        }
        assert_eq!(parse_date_string("yesterday"), None);
        assert_eq!(parse_date_string(""), None);
    }
}
