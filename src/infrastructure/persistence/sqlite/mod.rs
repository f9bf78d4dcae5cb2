//! SQLite Persistence - SQLite 数据库持久化实现

mod catalog_repo;
mod database;
mod identity_service;
mod user_repo;

pub use catalog_repo::*;
pub use database::*;
pub use identity_service::*;
pub use user_repo::*;
