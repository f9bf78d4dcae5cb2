//! Domain Layer - 领域层
//!
//! Library Context: 用户书架与阅读历史，本服务唯一有真实不变量的部分

pub mod library;
