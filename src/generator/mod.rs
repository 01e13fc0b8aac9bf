//! Generator module - writes the listing pages using the built-in templates

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::Post;
use crate::feed::FeedRenderer;
use crate::helpers::{full_url_for, url_for};
use crate::templates::{FragmentFormat, PageData, TemplateRenderer};
use crate::Site;

/// A listing page to generate
struct Listing<'a> {
    title: &'a str,
    path: &'a str,
    limit: Option<usize>,
}

/// Static page generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the home page and the index page
    ///
    /// `posts` must already be ordered newest first. Returns the written files.
    pub fn generate(&self, posts: &[Post]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.site.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.site.public_dir))?;

        let config = &self.site.config;
        let listings = [
            Listing {
                title: &config.home.title,
                path: &config.home.path,
                limit: config.home.limit,
            },
            Listing {
                title: &config.index.title,
                path: &config.index.path,
                limit: config.index.limit,
            },
        ];

        let mut written = Vec::with_capacity(listings.len());
        for listing in &listings {
            written.push(self.generate_listing(posts, listing)?);
        }

        Ok(written)
    }

    /// Render one listing page and write it to `<public_dir>/<path>/index.html`
    fn generate_listing(&self, posts: &[Post], listing: &Listing) -> Result<PathBuf> {
        let config = &self.site.config;

        let feed = FeedRenderer::new(config.feed_options(listing.limit)).render(posts);
        let content = self.renderer.render_feed(&feed, FragmentFormat::Html)?;

        // Listing paths are relative to the public directory and may not leave it
        let clean_path = listing.path.trim_matches('/');
        if clean_path.split(['/', '\\']).any(|segment| segment == "..") {
            bail!(
                "Listing path {:?} must stay inside the public directory",
                listing.path
            );
        }

        let page = PageData {
            site_title: config.title.clone(),
            page_title: listing.title.to_string(),
            language: config.language.clone(),
            root: url_for(config, ""),
            canonical: full_url_for(config, &format!("{}/", clean_path)),
            version: env!("CARGO_PKG_VERSION").to_string(),
            content,
        };
        let html = self.renderer.render_page(&page)?;

        let output_path = self.site.public_dir.join(clean_path).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::info!(
            "Generated {:?} ({} entries)",
            output_path,
            feed.entries().len()
        );

        Ok(output_path)
    }
}
