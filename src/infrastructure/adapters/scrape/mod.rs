//! 外部小说源抓取适配器

pub mod novelfull;

pub use novelfull::NovelfullClient;
