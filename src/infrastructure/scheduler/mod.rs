//! 后台定时任务

pub mod catalog_refresh;

pub use catalog_refresh::CatalogRefreshWorker;
