//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod auth_commands;
mod catalog_commands;
mod library_commands;
mod user_commands;

pub mod handlers;

pub use auth_commands::*;
pub use catalog_commands::*;
pub use library_commands::*;
pub use user_commands::*;
