//! Create a new post

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Front-matter written when the site has no `scaffolds/post.md`
const DEFAULT_SCAFFOLD: &str = "---\ntitle: {{ title }}\ndate: {{ date }}\n---\n";

/// Create a new post in `<source_dir>/_posts` and return its path
///
/// `name` overrides the file name, which otherwise is the slugified title.
pub fn create_post(site: &Site, title: &str, name: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let target_dir = site.source_dir.join("_posts");
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create {:?}", target_dir))?;

    let stem = match name {
        Some(n) => n.trim_end_matches(".md").to_string(),
        None => slug::slugify(title),
    };
    if stem.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }
    let file_path = target_dir.join(format!("{}.md", stem));

    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let scaffold_path = site.base_dir.join("scaffolds").join("post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)
            .with_context(|| format!("Failed to read scaffold {:?}", scaffold_path))?
    } else {
        DEFAULT_SCAFFOLD.to_string()
    };

    // Quoted so titles with colons stay valid YAML
    let quoted_title = serde_json::to_string(title)?;
    let content = scaffold
        .replace("{{ title }}", &quoted_title)
        .replace("{{ date }}", &now.format("%Y-%m-%d %H:%M:%S").to_string());

    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
