//! postfeed: post listings for a small static blog
//!
//! Loads posts from a content directory or a manifest, renders them into
//! bounded (home page) or unbounded (index page) listings, and writes those
//! listings as HTML pages or prints them as HTML/Markdown fragments.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod generator;
pub mod helpers;
pub mod templates;

pub use error::FeedError;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No config at {:?}, using defaults", config_path);
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Generate the listing pages
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<PathBuf> {
        commands::new::create_post(self, title, None)
    }
}
