//! List site content

use anyhow::Result;

use crate::content::{ContentStore, DirectoryStore};
use crate::helpers::iso_date;
use crate::Site;

/// Print every post, newest first
pub fn run(site: &Site) -> Result<()> {
    let posts = DirectoryStore::new(site).load_posts()?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {} - {} [{}]", iso_date(&post.date), post.title, post.url);
    }

    Ok(())
}
