//! Plain-text excerpts derived from a post body

use lazy_static::lazy_static;
use regex::Regex;

/// Maximum excerpt length in characters, not counting the ellipsis
pub const EXCERPT_LENGTH: usize = 150;

/// Appended when the plain text was cut short
pub const ELLIPSIS: char = '…';

lazy_static! {
    static ref MARKDOWN_SYNTAX: Regex = Regex::new(r"[#*_`\[\]()>\-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Remove markdown punctuation and fold whitespace runs into single spaces
pub fn strip_markdown(markdown: &str) -> String {
    let without_syntax = MARKDOWN_SYNTAX.replace_all(markdown, "");
    WHITESPACE
        .replace_all(without_syntax.trim(), " ")
        .into_owned()
}

/// Build the excerpt stored alongside a post
pub fn excerpt(markdown: &str) -> String {
    let plain = strip_markdown(markdown);
    if plain.chars().count() <= EXCERPT_LENGTH {
        return plain;
    }

    let mut short: String = plain.chars().take(EXCERPT_LENGTH).collect();
    short.push(ELLIPSIS);
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_body() {
        assert_eq!(excerpt("# Hi\nBody text."), "Hi Body text.");
    }

    #[test]
    fn test_strips_markdown_punctuation() {
        let md = "> **Bold** and _italic_ with `code` and [a link](http://x.io)\n- item";
        assert_eq!(
            strip_markdown(md),
            "Bold and italic with code and a linkhttp://x.io item"
        );
    }

    #[test]
    fn test_short_content_has_no_ellipsis() {
        let md = "a".repeat(EXCERPT_LENGTH);
        let out = excerpt(&md);
        assert_eq!(out, md);
        assert!(!out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_long_content_is_cut() {
        let md = "b".repeat(EXCERPT_LENGTH + 1);
        let out = excerpt(&md);
        assert_eq!(out.chars().count(), EXCERPT_LENGTH + 1);
        assert!(out.ends_with(ELLIPSIS));
        assert_eq!(&out[..EXCERPT_LENGTH], &md[..EXCERPT_LENGTH]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let md = "é".repeat(EXCERPT_LENGTH);
        assert_eq!(excerpt(&md), md);

        let long = "ü".repeat(EXCERPT_LENGTH + 10);
        let out = excerpt(&long);
        assert_eq!(out.chars().filter(|c| *c == 'ü').count(), EXCERPT_LENGTH);
    }

    #[test]
    fn test_length_measured_after_stripping() {
        // 200 chars of input but only 100 survive stripping
        let md = "#a".repeat(100);
        let out = excerpt(&md);
        assert_eq!(out, "a".repeat(100));
    }
}
