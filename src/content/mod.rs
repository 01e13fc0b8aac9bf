//! Content module - posts, front-matter and the stores that load them

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::{ContentStore, DirectoryStore, ManifestStore};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostRecord};
