//! Built-in listing templates using the Tera template engine
//!
//! The templates are embedded in the binary; a site needs no theme
//! directory to get its home and index pages.

use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use tera::{Context, Tera};

use crate::feed::Feed;
use crate::helpers::{html_escape, markdown_escape};

/// Output format of a listing fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentFormat {
    Html,
    Markdown,
}

impl FragmentFormat {
    fn template_name(self) -> &'static str {
        match self {
            FragmentFormat::Html => "feed.html",
            FragmentFormat::Markdown => "feed.md",
        }
    }
}

impl FromStr for FragmentFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "html" => Ok(FragmentFormat::Html),
            "md" | "markdown" => Ok(FragmentFormat::Markdown),
            _ => bail!("Unknown format: {}. Available: html, markdown", s),
        }
    }
}

/// Template renderer with the embedded listing templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Escaping is explicit through the html_escape filter; autoescape
        // would also mangle the slashes in URLs
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("feed.html", include_str!("feed/feed.html")),
            ("feed.md", include_str!("feed/feed.md")),
            ("layout.html", include_str!("feed/layout.html")),
        ])?;

        tera.register_filter("html_escape", html_escape_filter);
        tera.register_filter("md_escape", md_escape_filter);

        Ok(Self { tera })
    }

    /// Render a listing as an HTML or Markdown fragment
    pub fn render_feed(&self, feed: &Feed, format: FragmentFormat) -> Result<String> {
        let mut context = Context::new();
        context.insert("entries", feed.entries());
        context.insert("is_placeholder", &feed.placeholder().is_some());
        context.insert("placeholder", &feed.placeholder());
        Ok(self.tera.render(format.template_name(), &context)?)
    }

    /// Wrap an HTML fragment in the page layout
    pub fn render_page(&self, page: &PageData) -> Result<String> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render("layout.html", &context)?)
    }
}

/// Tera filter: escape HTML special characters
fn html_escape_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("html_escape", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Tera filter: escape Markdown link and emphasis syntax
fn md_escape_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("md_escape", "value", String, value);
    Ok(tera::Value::String(markdown_escape(&s)))
}

/// Context for a generated listing page
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub site_title: String,
    pub page_title: String,
    pub language: String,
    pub root: String,
    pub canonical: String,
    pub version: String,
    /// Pre-rendered HTML fragment
    pub content: String,
}
