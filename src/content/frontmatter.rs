//! Front-matter parsing

use serde::{Deserialize, Serialize};

use super::PostRecord;
use crate::error::FeedError;

/// Front-matter data from a post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(alias = "permalink")]
    pub url: Option<String>,
    pub excerpt: Option<String>,
    /// Posts are published unless they opt out
    pub published: bool,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            url: None,
            excerpt: None,
            published: true,
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse<'a>(content: &'a str, origin: &str) -> Result<(Self, &'a str), FeedError> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content, origin);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content, origin);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml<'a>(content: &'a str, origin: &str) -> Result<(Self, &'a str), FeedError> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return Err(FeedError::front_matter(origin, "missing closing `---`"));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A leading `---` can also be a Markdown thematic break; only treat the
        // block as front-matter if some line looks like `key: value`
        if !has_yaml_structure(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map_err(|e| FeedError::front_matter(origin, e))?;
        Ok((fm, remaining))
    }

    fn parse_json<'a>(content: &'a str, origin: &str) -> Result<(Self, &'a str), FeedError> {
        // JSON front-matter fenced by ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let Some(end_pos) = rest.find(";;;") else {
                return Err(FeedError::front_matter(origin, "missing closing `;;;`"));
            };
            let json_content = rest[..end_pos].trim();
            let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

            // Fenced JSON may leave out the outer braces
            let fm: FrontMatter = if json_content.starts_with('{') {
                serde_json::from_str(json_content)
            } else {
                serde_json::from_str(&format!("{{{}}}", json_content))
            }
            .map_err(|e| FeedError::front_matter(origin, e))?;

            return Ok((fm, remaining));
        }

        // A bare JSON object at the start; find the matching closing brace
        let mut depth = 0;
        let mut in_string = false;
        let mut escaped = false;
        let mut end_pos = 0;
        for (i, c) in content.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if end_pos == 0 {
            return Err(FeedError::front_matter(origin, "unterminated JSON object"));
        }

        let fm: FrontMatter = serde_json::from_str(&content[..end_pos])
            .map_err(|e| FeedError::front_matter(origin, e))?;
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);

        Ok((fm, remaining))
    }

    /// Metadata fields as an unvalidated record
    pub fn into_record(self) -> PostRecord {
        PostRecord {
            title: self.title,
            url: self.url,
            date: self.date,
            excerpt: self.excerpt,
        }
    }
}

/// Check for at least one `key: value` line, ignoring URL schemes
fn has_yaml_structure(yaml_content: &str) -> bool {
    yaml_content.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Generics in Rust and Java
date: 2025-12-11 10:30:00
tags:
  - rust
  - java
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content, "a.md").unwrap();
        assert_eq!(fm.title, Some("Generics in Rust and Java".to_string()));
        assert_eq!(fm.date, Some("2025-12-11 10:30:00".to_string()));
        assert!(fm.published);
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Type {erasure}", "date": "2025-12-01"}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content, "a.md").unwrap();
        assert_eq!(fm.title, Some("Type {erasure}".to_string()));
        assert!(remaining.starts_with("This is content."));
    }

    #[test]
    fn test_parse_fenced_json_frontmatter() {
        let content = ";;;\n\"title\": \"Fenced\",\n\"published\": false\n;;;\nBody";
        let (fm, remaining) = FrontMatter::parse(content, "a.md").unwrap();
        assert_eq!(fm.title, Some("Fenced".to_string()));
        assert!(!fm.published);
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_permalink_key() {
        let content = "---\ntitle: T\npermalink: /custom/\n---\n";
        let (fm, _) = FrontMatter::parse(content, "a.md").unwrap();
        assert_eq!(fm.url, Some("/custom/".to_string()));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\ndate: 2025-12-11\n---\nBody";
        let err = FrontMatter::parse(content, "broken.md").unwrap_err();
        assert!(matches!(err, FeedError::InvalidFrontMatter { ref origin, .. } if origin == "broken.md"));
    }

    #[test]
    fn test_unclosed_yaml_is_an_error() {
        let content = "---\ntitle: Never closed\n";
        assert!(FrontMatter::parse(content, "a.md").is_err());
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, remaining) = FrontMatter::parse(content, "a.md").unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("Some text"));
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse(content, "a.md").unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("Just text.", "a.md").unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(remaining, "Just text.");
    }
}
