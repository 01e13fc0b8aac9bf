//! Content stores - load posts from a source directory or a manifest file

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::post::sort_newest_first;
use super::{FrontMatter, MarkdownRenderer, Post, PostRecord};
use crate::helpers::{parse_date, url_for};
use crate::Site;

/// A source of posts for a render pass
///
/// Implementations return every post newest first, and fail on the first
/// post with broken metadata.
pub trait ContentStore {
    fn load_posts(&self) -> Result<Vec<Post>>;
}

/// Loads posts from `<source_dir>/_posts`
pub struct DirectoryStore<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> DirectoryStore<'a> {
    /// Create a new directory store
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Directory holding the post sources
    pub fn posts_dir(&self) -> PathBuf {
        self.site.source_dir.join("_posts")
    }

    /// Load a single post from a file
    ///
    /// Returns `None` for unpublished posts when drafts are not rendered.
    fn load_post(&self, path: &Path) -> Result<Option<Post>> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        let origin = path
            .strip_prefix(&self.site.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let (fm, body) = FrontMatter::parse(&content, &origin)?;
        if !fm.published && !self.site.config.render_drafts {
            tracing::debug!("Skipping unpublished post {}", origin);
            return Ok(None);
        }

        let mut record = fm.into_record();

        if record.url.is_none() {
            // The :title placeholder uses the file name, not the post title
            let slug = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(slug::slugify)
                .unwrap_or_default();
            if let Some(date) = record.date.as_deref().and_then(parse_date) {
                record.url = Some(self.generate_permalink(&date, &slug));
            }
        }

        record.excerpt = self.resolve_excerpt(record.excerpt.as_deref(), body);

        let post = record.into_post(&origin)?;
        Ok(Some(post))
    }

    /// Front-matter excerpt, else the part before `<!-- more -->`, else the
    /// first paragraph when auto excerpts are on
    fn resolve_excerpt(&self, explicit: Option<&str>, body: &str) -> Option<String> {
        if let Some(excerpt) = explicit {
            return Some(self.renderer.render(excerpt));
        }

        if let Some(excerpt) = MarkdownRenderer::split_excerpt(body) {
            return Some(self.renderer.render(excerpt));
        }

        if self.site.config.excerpt.auto {
            return self.renderer.render_first_paragraph(body);
        }

        None
    }

    /// Generate permalink based on config pattern
    fn generate_permalink(&self, date: &NaiveDate, slug: &str) -> String {
        let pattern = &self.site.config.permalink;

        let result = pattern
            .replace(":year", &date.format("%Y").to_string())
            .replace(":month", &date.format("%m").to_string())
            .replace(":day", &date.format("%d").to_string())
            .replace(":i_month", &date.format("%-m").to_string())
            .replace(":i_day", &date.format("%-d").to_string())
            .replace(":title", slug)
            .replace(":name", slug);

        url_for(&self.site.config, &result)
    }
}

impl ContentStore for DirectoryStore<'_> {
    fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.posts_dir();
        if !posts_dir.exists() {
            tracing::warn!("No posts directory at {:?}", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", posts_dir))?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                if let Some(post) = self.load_post(path)? {
                    posts.push(post);
                }
            }
        }

        sort_newest_first(&mut posts);
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), posts_dir);

        Ok(posts)
    }
}

/// Loads post records from a YAML, JSON or TOML manifest
pub struct ManifestStore {
    path: PathBuf,
}

/// Either a bare list of records or a table with a `posts` list
///
/// The shape is picked from the top-level value, then records are read
/// straight from the format so its own errors (and scalar rules) apply.
struct Manifest(Vec<PostRecord>);

impl Manifest {
    fn into_records(self) -> Vec<PostRecord> {
        self.0
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ManifestVisitor;

        impl<'de> Visitor<'de> for ManifestVisitor {
            type Value = Manifest;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a list of posts or a table with a `posts` list")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Manifest, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut records = Vec::new();
                while let Some(record) = seq.next_element::<PostRecord>()? {
                    records.push(record);
                }
                Ok(Manifest(records))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Manifest, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut records = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "posts" {
                        if records.is_some() {
                            return Err(de::Error::duplicate_field("posts"));
                        }
                        records = Some(map.next_value::<Vec<PostRecord>>()?);
                    } else {
                        map.next_value::<de::IgnoredAny>()?;
                    }
                }
                records
                    .map(Manifest)
                    .ok_or_else(|| de::Error::missing_field("posts"))
            }
        }

        deserializer.deserialize_any(ManifestVisitor)
    }
}

impl ManifestStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn parse(&self, content: &str) -> Result<Manifest> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let manifest: Manifest = match ext {
            "yaml" | "yml" => serde_yaml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            "toml" => {
                let mut value: toml::Value = toml::from_str(content)?;
                stringify_datetimes(&mut value);
                value.try_into()?
            }
            _ => bail!(
                "Unsupported manifest format {:?}. Available: yaml, yml, json, toml",
                self.path
            ),
        };

        Ok(manifest)
    }
}

impl ContentStore for ManifestStore {
    fn load_posts(&self) -> Result<Vec<Post>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read manifest {:?}", self.path))?;
        let manifest = self
            .parse(&content)
            .with_context(|| format!("Failed to parse manifest {:?}", self.path))?;

        let mut posts = manifest
            .into_records()
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let origin = format!("{} (entry {})", self.path.display(), i + 1);
                record.into_post(&origin).map_err(anyhow::Error::from)
            })
            .collect::<Result<Vec<_>>>()?;

        sort_newest_first(&mut posts);
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.path);

        Ok(posts)
    }
}

/// TOML dates are native values; records expect them as strings
fn stringify_datetimes(value: &mut toml::Value) {
    match value {
        toml::Value::Datetime(dt) => {
            let date = dt.to_string();
            *value = toml::Value::String(date);
        }
        toml::Value::Array(items) => items.iter_mut().for_each(stringify_datetimes),
        toml::Value::Table(table) => table.iter_mut().for_each(|(_, v)| stringify_datetimes(v)),
        _ => {}
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
