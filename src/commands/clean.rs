//! Clean the public directory

use anyhow::{Context, Result};
use std::fs;

use crate::Site;

/// Delete the public directory
pub fn run(site: &Site) -> Result<()> {
    if site.public_dir.exists() {
        fs::remove_dir_all(&site.public_dir)
            .with_context(|| format!("Failed to delete {:?}", site.public_dir))?;
        tracing::info!("Deleted: {:?}", site.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", site.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_dir() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        fs::create_dir_all(site.public_dir.join("posts")).unwrap();
        fs::write(site.public_dir.join("index.html"), "<ul></ul>").unwrap();

        run(&site).unwrap();
        assert!(!site.public_dir.exists());

        // A second clean is a no-op
        run(&site).unwrap();
    }
}
