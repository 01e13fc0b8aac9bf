//! Post model and validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::helpers::parse_date;

/// A blog post, as handed to the feed renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Link target (root-relative or absolute)
    pub url: String,

    /// Publication date
    pub date: NaiveDate,

    /// Excerpt, possibly containing markup
    pub excerpt: Option<String>,
}

impl Post {
    /// Create a post without an excerpt
    pub fn new(title: impl Into<String>, url: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            date,
            excerpt: None,
        }
    }

    /// Attach an excerpt
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }
}

/// Unvalidated post metadata as it appears in a content store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostRecord {
    pub title: Option<String>,
    #[serde(alias = "permalink")]
    pub url: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
}

impl PostRecord {
    /// Validate the record into a [`Post`]
    ///
    /// `origin` names where the record came from and ends up in the error.
    pub fn into_post(self, origin: &str) -> Result<Post, FeedError> {
        let title = required(self.title, origin, "title")?;
        let raw_date = required(self.date, origin, "date")?;
        let date =
            parse_date(&raw_date).ok_or_else(|| FeedError::malformed_date(origin, raw_date))?;
        let url = required(self.url, origin, "url")?;

        let excerpt = self.excerpt.filter(|e| !e.trim().is_empty());

        Ok(Post {
            title,
            url,
            date,
            excerpt,
        })
    }
}

fn required(value: Option<String>, origin: &str, field: &'static str) -> Result<String, FeedError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(FeedError::missing(origin, field)),
    }
}

/// Sort newest first; posts sharing a date keep their relative order
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}
