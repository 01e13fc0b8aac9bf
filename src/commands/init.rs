//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Site
title: Blog
language: en

# URL
url: http://example.com
root: /
permalink: :year/:month/:day/:title/

# Directory
source_dir: source
public_dir: public

# Writing
render_drafts: false

# Listings
date_format: MMMM DD, YYYY
empty_message: No posts yet.
excerpt:
  length: 150
  omission: "..."
  auto: true
home:
  title: Recent Posts
  path: ''
  limit: 5
index:
  title: All Posts
  path: posts
  limit:
"#;

const POST_SCAFFOLD: &str = "---\ntitle: {{ title }}\ndate: {{ date }}\n---\n";

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(target_dir.join("scaffolds/post.md"), POST_SCAFFOLD)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
---

Welcome! This is the first post. Everything above the more marker
shows up as the excerpt on the home page.

<!-- more -->

Run `postfeed new "My New Post"` to add another one, then
`postfeed generate` to rebuild the listings.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );
    fs::write(target_dir.join("source/_posts/hello-world.md"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentStore, DirectoryStore};
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_is_loadable() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.config.home.limit, Some(5));
        assert_eq!(site.config.index.limit, None);

        let posts = DirectoryStore::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello World");
        assert!(posts[0]
            .excerpt
            .as_deref()
            .unwrap()
            .contains("first post"));

        assert!(init_site(tmp.path()).is_err());
    }
}
