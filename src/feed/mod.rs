//! Post feed renderer - turns an ordered post list into listing entries
//!
//! Used by both the home page (bounded) and the index page (unbounded).
//! Rendering is a pure transformation: posts are borrowed, never mutated,
//! and the output only depends on the posts and the options.

use serde::Serialize;

use crate::content::Post;
use crate::helpers::{format_date, iso_date, plain_text, truncate};

/// Options for a single listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOptions {
    /// Maximum number of entries, `None` for all posts
    pub limit: Option<usize>,
    /// Character budget for excerpts
    pub excerpt_length: usize,
    /// Marker appended to truncated excerpts
    pub omission: String,
    /// Moment-style format for entry dates
    pub date_format: String,
    /// Shown instead of an empty listing
    pub empty_message: String,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            limit: None,
            excerpt_length: 150,
            omission: "...".to_string(),
            date_format: "MMMM DD, YYYY".to_string(),
            empty_message: "No posts yet.".to_string(),
        }
    }
}

/// One rendered listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub title: String,
    pub url: String,
    /// Long-form date, e.g. "December 11, 2025"
    pub date: String,
    /// YYYY-MM-DD, for `datetime` attributes
    pub iso_date: String,
    /// Plain-text excerpt within the character budget
    pub excerpt: Option<String>,
}

/// A rendered listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    Entries(Vec<FeedEntry>),
    /// The input had no posts
    Placeholder(String),
}

impl Feed {
    /// Rendered entries; empty for a placeholder
    pub fn entries(&self) -> &[FeedEntry] {
        match self {
            Feed::Entries(entries) => entries.as_slice(),
            Feed::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Feed::Entries(_) => None,
            Feed::Placeholder(message) => Some(message.as_str()),
        }
    }

    /// Number of rendered items; a placeholder counts as one
    pub fn len(&self) -> usize {
        match self {
            Feed::Entries(entries) => entries.len(),
            Feed::Placeholder(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Renders post listings
pub struct FeedRenderer {
    options: FeedOptions,
}

impl FeedRenderer {
    pub fn new(options: FeedOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FeedOptions {
        &self.options
    }

    /// Render posts, given newest first, into a listing
    pub fn render(&self, posts: &[Post]) -> Feed {
        if posts.is_empty() {
            tracing::debug!("No posts, rendering placeholder");
            return Feed::Placeholder(self.options.empty_message.clone());
        }

        let limit = self.options.limit.unwrap_or(posts.len());
        let entries: Vec<FeedEntry> = posts
            .iter()
            .take(limit)
            .map(|post| self.render_entry(post))
            .collect();

        tracing::debug!("Rendered {} of {} posts", entries.len(), posts.len());
        Feed::Entries(entries)
    }

    /// Render a single post
    pub fn render_entry(&self, post: &Post) -> FeedEntry {
        FeedEntry {
            title: post.title.clone(),
            url: post.url.clone(),
            date: format_date(&post.date, &self.options.date_format),
            iso_date: iso_date(&post.date),
            excerpt: post.excerpt.as_deref().and_then(|raw| {
                excerpt_text(raw, self.options.excerpt_length, &self.options.omission)
            }),
        }
    }
}

/// Strip markup from an excerpt and fit it into the character budget
///
/// Returns `None` when nothing but markup and whitespace was left.
pub fn excerpt_text(raw: &str, length: usize, omission: &str) -> Option<String> {
    let text = plain_text(raw);
    if text.is_empty() {
        return None;
    }
    Some(truncate(&text, length, Some(omission)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(title: &str, y: i32, m: u32, d: u32) -> Post {
        Post::new(
            title,
            format!("/{}/", title.to_lowercase()),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    fn renderer(limit: Option<usize>) -> FeedRenderer {
        FeedRenderer::new(FeedOptions {
            limit,
            ..FeedOptions::default()
        })
    }

    fn titles(feed: &Feed) -> Vec<&str> {
        feed.entries().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_two_posts_with_room_to_spare() {
        let posts = vec![
            post("Monomorphization", 2025, 12, 11),
            post("Erasure", 2025, 12, 1),
        ];
        let feed = renderer(Some(5)).render(&posts);

        assert_eq!(feed.len(), 2);
        assert_eq!(titles(&feed), ["Monomorphization", "Erasure"]);
        assert_eq!(feed.entries()[0].date, "December 11, 2025");
        assert_eq!(feed.entries()[1].date, "December 01, 2025");
        assert_eq!(feed.entries()[1].iso_date, "2025-12-01");
    }

    #[test]
    fn test_limit_bounds_output_and_keeps_order() {
        let posts: Vec<Post> = (1..=9)
            .rev()
            .map(|d| post(&format!("p{}", d), 2025, 11, d))
            .collect();

        for limit in 0..12 {
            let feed = renderer(Some(limit)).render(&posts);
            assert!(feed.len() <= limit);
            assert!(feed.placeholder().is_none());
            let expected: Vec<&str> = posts
                .iter()
                .take(limit)
                .map(|p| p.title.as_str())
                .collect();
            assert_eq!(titles(&feed), expected);
        }
    }

    #[test]
    fn test_unbounded_renders_everything() {
        let posts = vec![
            post("a", 2025, 3, 1),
            post("b", 2025, 2, 1),
            post("c", 2025, 1, 1),
        ];
        let feed = renderer(None).render(&posts);
        assert_eq!(titles(&feed), ["a", "b", "c"]);
    }

    #[test]
    fn test_input_order_is_trusted() {
        // Not sorted by date: the renderer keeps whatever order it was given
        let posts = vec![post("old", 2020, 1, 1), post("new", 2025, 1, 1)];
        let feed = renderer(Some(1)).render(&posts);
        assert_eq!(titles(&feed), ["old"]);
    }

    #[test]
    fn test_empty_input_yields_placeholder() {
        let feed = renderer(Some(5)).render(&[]);
        assert_eq!(feed, Feed::Placeholder("No posts yet.".to_string()));
        assert_eq!(feed.len(), 1);
        assert!(feed.entries().is_empty());

        let feed = renderer(Some(0)).render(&[]);
        assert_eq!(feed.placeholder(), Some("No posts yet."));
    }

    #[test]
    fn test_excerpt_stripped_and_truncated() {
        let long = format!("<p>{}</p>", "generic ".repeat(40));
        let posts = vec![post("a", 2025, 12, 11).with_excerpt(long)];
        let feed = renderer(None).render(&posts);

        let excerpt = feed.entries()[0].excerpt.as_deref().unwrap();
        assert!(!excerpt.contains('<'));
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.chars().count() <= 150 + 3);
    }

    #[test]
    fn test_excerpt_budget_never_exceeded() {
        let omission = "…";
        let raw = "<div><span style=\"color:#c678dd\">impl</span>&lt;T: Ord&gt; Max for Vec&lt;T&gt; { }</div> and some prose";
        for length in 0..80 {
            if let Some(text) = excerpt_text(raw, length, omission) {
                assert!(text.chars().count() <= length + omission.chars().count());
            }
        }
    }

    #[test]
    fn test_short_excerpt_untouched() {
        assert_eq!(
            excerpt_text("<p>Traits &amp; bounds</p>", 150, "..."),
            Some("Traits & bounds".to_string())
        );
    }

    #[test]
    fn test_entities_decoded_before_truncation() {
        assert_eq!(
            excerpt_text("abcd &mdash; efg", 8, "..."),
            Some("abcd \u{2014} e...".to_string())
        );
        assert_eq!(
            excerpt_text("Rust &mdash; Java &#8212; x&nbsp;y", 150, "..."),
            Some("Rust \u{2014} Java \u{2014} x y".to_string())
        );
    }

    #[test]
    fn test_markup_only_excerpt_dropped() {
        let posts = vec![post("a", 2025, 12, 11).with_excerpt("<p> <br/> </p>")];
        let feed = renderer(None).render(&posts);
        assert_eq!(feed.entries()[0].excerpt, None);
    }

    #[test]
    fn test_custom_date_format() {
        let renderer = FeedRenderer::new(FeedOptions {
            date_format: "YYYY/MM/DD".to_string(),
            ..FeedOptions::default()
        });
        let entry = renderer.render_entry(&post("a", 2025, 12, 11));
        assert_eq!(entry.date, "2025/12/11");
    }
}
