//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::feed::FeedOptions;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    pub permalink: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    pub render_drafts: bool,

    // Listing
    pub date_format: String,
    pub empty_message: String,
    #[serde(default)]
    pub excerpt: ExcerptConfig,
    #[serde(default)]
    pub home: HomeConfig,
    #[serde(default)]
    pub index: IndexConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            permalink: ":year/:month/:day/:title/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            render_drafts: false,

            date_format: "MMMM DD, YYYY".to_string(),
            empty_message: "No posts yet.".to_string(),
            excerpt: ExcerptConfig::default(),
            home: HomeConfig::default(),
            index: IndexConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Build renderer options for a listing with the given bound
    pub fn feed_options(&self, limit: Option<usize>) -> FeedOptions {
        FeedOptions {
            limit,
            excerpt_length: self.excerpt.length,
            omission: self.excerpt.omission.clone(),
            date_format: self.date_format.clone(),
            empty_message: self.empty_message.clone(),
        }
    }
}

/// Excerpt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    /// Character budget for listing excerpts
    pub length: usize,
    /// Marker appended to truncated excerpts
    pub omission: String,
    /// Fall back to the first paragraph when a post has no explicit excerpt
    pub auto: bool,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            length: 150,
            omission: "...".to_string(),
            auto: true,
        }
    }
}

/// Home page listing: the most recent posts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Page heading
    pub title: String,
    /// Output path under the public directory
    pub path: String,
    /// Maximum number of posts, `None` for all of them
    pub limit: Option<usize>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            title: "Recent Posts".to_string(),
            path: String::new(),
            limit: Some(5),
        }
    }
}

/// Index page listing: every post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub title: String,
    pub path: String,
    pub limit: Option<usize>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            title: "All Posts".to_string(),
            path: "posts".to_string(),
            limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Blog");
        assert_eq!(config.excerpt.length, 150);
        assert_eq!(config.home.limit, Some(5));
        assert_eq!(config.index.limit, None);
        assert_eq!(config.index.path, "posts");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Generics, Two Ways
date_format: YYYY-MM-DD
excerpt:
  length: 80
home:
  limit: 3
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Generics, Two Ways");
        assert_eq!(config.date_format, "YYYY-MM-DD");
        assert_eq!(config.excerpt.length, 80);
        assert_eq!(config.excerpt.omission, "...");
        assert_eq!(config.home.limit, Some(3));
        assert_eq!(config.home.path, "");
        assert_eq!(config.index.path, "posts");
    }

    #[test]
    fn test_partial_index_keeps_path() {
        let config: SiteConfig = serde_yaml::from_str("index:\n  limit: 20\n").unwrap();
        assert_eq!(config.index.limit, Some(20));
        assert_eq!(config.index.path, "posts");
    }

    #[test]
    fn test_feed_options() {
        let config = SiteConfig::default();
        let options = config.feed_options(Some(2));
        assert_eq!(options.limit, Some(2));
        assert_eq!(options.excerpt_length, 150);
        assert_eq!(options.empty_message, "No posts yet.");
    }
}
