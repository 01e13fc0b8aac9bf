//! Generate the listing pages

use anyhow::Result;
use std::path::PathBuf;

use crate::content::{ContentStore, DirectoryStore};
use crate::generator::Generator;
use crate::Site;

/// Load posts from the source directory and write the home and index pages
pub fn run(site: &Site) -> Result<Vec<PathBuf>> {
    let start = std::time::Instant::now();

    let posts = DirectoryStore::new(site).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let generator = Generator::new(site)?;
    let written = generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(written)
}
