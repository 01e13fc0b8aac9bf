//! Markdown rendering for post excerpts

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

/// Separator between a post's excerpt and the rest of its body
pub const MORE_MARKER: &str = "<!-- more -->";

/// Markdown renderer
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // No YAML metadata blocks: front-matter is handled by FrontMatter::parse()
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        Self { options }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let mut html_output = String::new();
        html::push_html(&mut html_output, Parser::new_ext(markdown, self.options));
        html_output
    }

    /// Render only the first paragraph of a document
    ///
    /// Headings, code blocks and raw HTML blocks before it are skipped, so a
    /// post that opens with a styled code sample still gets a prose excerpt.
    pub fn render_first_paragraph(&self, markdown: &str) -> Option<String> {
        let mut events = Vec::new();
        let mut inside = false;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::Paragraph) if !inside => {
                    inside = true;
                    events.push(event);
                }
                Event::End(TagEnd::Paragraph) if inside => {
                    events.push(event);
                    break;
                }
                _ if inside => events.push(event),
                _ => {}
            }
        }

        if events.is_empty() {
            return None;
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        Some(html_output)
    }

    /// Split the explicit excerpt (before `<!-- more -->`) from the body
    pub fn split_excerpt(content: &str) -> Option<&str> {
        content
            .find(MORE_MARKER)
            .map(|pos| content[..pos].trim())
            .filter(|excerpt| !excerpt.is_empty())
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
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_first_paragraph_skips_code_and_headings() {
        let renderer = MarkdownRenderer::new();
        let markdown = "# Generics\n\n```java\nList<String> xs;\n```\n\nJava erases *types*.\n\nSecond paragraph.";
        let html = renderer.render_first_paragraph(markdown).unwrap();
        assert_eq!(html.trim(), "<p>Java erases <em>types</em>.</p>");
    }

    #[test]
    fn test_first_paragraph_none() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.render_first_paragraph("## Only a heading"), None);
        assert_eq!(renderer.render_first_paragraph(""), None);
    }

    #[test]
    fn test_split_excerpt() {
        let content = "This is excerpt.\n<!-- more -->\nThis is more content.";
        assert_eq!(
            MarkdownRenderer::split_excerpt(content),
            Some("This is excerpt.")
        );
        assert_eq!(MarkdownRenderer::split_excerpt("No marker here."), None);
        assert_eq!(MarkdownRenderer::split_excerpt("<!-- more -->\nbody"), None);
    }
}
