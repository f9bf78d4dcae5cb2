//! 出站适配器

pub mod scrape;

pub use scrape::NovelfullClient;
