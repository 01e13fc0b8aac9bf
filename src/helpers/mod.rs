//! Helper functions shared by the content loader, the feed renderer and
//! the templates

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
