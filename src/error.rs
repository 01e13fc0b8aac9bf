//! Build-time configuration errors for post metadata

use thiserror::Error;

/// Errors raised while turning content-store records into posts.
///
/// These are never recovered: a post with broken metadata stops the build.
/// `origin` names the file or manifest entry the record came from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("{origin}: missing required field `{field}`")]
    MissingField { origin: String, field: &'static str },

    #[error("{origin}: malformed date `{value}`")]
    MalformedDate { origin: String, value: String },

    #[error("{origin}: invalid front-matter: {reason}")]
    InvalidFrontMatter { origin: String, reason: String },
}

impl FeedError {
    pub fn missing(origin: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            origin: origin.into(),
            field,
        }
    }

    pub fn malformed_date(origin: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedDate {
            origin: origin.into(),
            value: value.into(),
        }
    }

    pub fn front_matter(origin: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidFrontMatter {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}
