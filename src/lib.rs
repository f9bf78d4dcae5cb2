//! Shujia - 移动端小说阅读后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Library Context: 用户书架与阅读轨迹
//!
//! 应用层 (application/):
//! - Ports: 端口定义（UserRepository, Catalog, Identity, NovelSource）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: SQLite 存储（用户文档、令牌、已完结目录）
//! - Adapters: 来源站抓取客户端
//! - Scheduler: 目录定时刷新

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
