//! Markdown rendering for the reader view

use pulldown_cmark::{html, Event, Options, Parser};

/// Markdown to HTML renderer
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    allow_raw_html: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // No YAML metadata blocks: the header never reaches the renderer
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_GFM;
        Self {
            options,
            allow_raw_html: true,
        }
    }

    /// Escape inline and block HTML instead of passing it through
    pub fn escape_html(mut self) -> Self {
        self.allow_raw_html = false;
        self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let allow_raw_html = self.allow_raw_html;
        let events = parser.map(move |event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) if !allow_raw_html => Event::Text(raw),
            other => other,
        });

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events);
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let html = MarkdownRenderer::new().render("# Hello\n\nThis is **bold** text.");
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_render_fenced_code() {
        let html = MarkdownRenderer::new().render("```rust\nfn main() {}\n```\n");
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_render_table() {
        let md = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let html = MarkdownRenderer::new().render(md);
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_escape_html() {
        let md = "<script>alert(1)</script>\n\ntext with <b>tag</b>";
        let html = MarkdownRenderer::new().escape_html().render(md);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }
}
