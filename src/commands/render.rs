//! Render a listing fragment

use anyhow::Result;
use std::path::PathBuf;

use crate::content::{ContentStore, DirectoryStore, ManifestStore};
use crate::feed::FeedRenderer;
use crate::templates::{FragmentFormat, TemplateRenderer};
use crate::Site;

/// Options for the render command
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Read posts from a manifest instead of the source directory
    pub manifest: Option<PathBuf>,
    /// Maximum number of posts; defaults to the home page limit
    pub limit: Option<usize>,
    /// Render every post, ignoring any limit
    pub all: bool,
    pub format: FragmentFormat,
}

/// Render a listing fragment and return it
pub fn run(site: &Site, options: &RenderOptions) -> Result<String> {
    let posts = match &options.manifest {
        Some(path) => ManifestStore::new(path).load_posts()?,
        None => DirectoryStore::new(site).load_posts()?,
    };

    let limit = if options.all {
        None
    } else {
        options.limit.or(site.config.home.limit)
    };

    let feed = FeedRenderer::new(site.config.feed_options(limit)).render(&posts);
    tracing::debug!("Rendering {} items as {:?}", feed.len(), options.format);

    TemplateRenderer::new()?.render_feed(&feed, options.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_manifest(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("posts.yaml");
        fs::write(
            &path,
            r#"
posts:
  - title: Monomorphization
    url: /2025/12/11/monomorphization/
    date: 2025-12-11
  - title: Type Erasure
    url: /2025/12/01/erasure/
    date: 2025-12-01
"#,
        )
        .unwrap();
        path
    }

    fn options(manifest: PathBuf, limit: Option<usize>, all: bool) -> RenderOptions {
        RenderOptions {
            manifest: Some(manifest),
            limit,
            all,
            format: FragmentFormat::Markdown,
        }
    }

    #[test]
    fn test_render_manifest_with_limit() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        let manifest = write_manifest(tmp.path());

        let md = run(&site, &options(manifest.clone(), Some(5), false)).unwrap();
        assert_eq!(md.lines().count(), 2);
        assert!(md.starts_with("- [Monomorphization](/2025/12/11/monomorphization/) · December 11, 2025"));

        let md = run(&site, &options(manifest.clone(), Some(1), false)).unwrap();
        assert_eq!(md.lines().count(), 1);

        let md = run(&site, &options(manifest, Some(1), true)).unwrap();
        assert_eq!(md.lines().count(), 2);
    }

    #[test]
    fn test_render_empty_source_dir() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        let options = RenderOptions {
            manifest: None,
            limit: None,
            all: false,
            format: FragmentFormat::Html,
        };

        let html = run(&site, &options).unwrap();
        assert_eq!(html.trim(), r#"<p class="post-list-empty">No posts yet.</p>"#);
    }
}
