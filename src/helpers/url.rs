//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/") // -> "/blog/posts/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    // Absolute URLs pass through untouched
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/posts/") // -> "https://example.com/blog/posts/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let path = url_for(config, path);
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
        return path;
    }

    format!("{}{}", config.url.trim_end_matches('/'), path)
}
