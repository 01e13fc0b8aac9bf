//! Configuration module

mod site;

pub use site::ExcerptConfig;
pub use site::HomeConfig;
pub use site::IndexConfig;
pub use site::SiteConfig;
