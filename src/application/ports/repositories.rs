//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口，具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::library::Library;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// User Repository
// ============================================================================

/// 用户文档（用于持久化）
///
/// 核心每次操作持有一份独占的内存副本: 加载 → 修改 → 整体写回。
/// 凭证摘要不出现在这里，属于 IdentityPort 的职责。
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,

    /// 对外公开的稳定别名，用于好友查找，与内部 id 区分
    pub public_id: String,

    pub date_joined: DateTime<Utc>,
    pub profile_image: String,
    pub theme: Option<String>,

    /// 好友别名集合（public_id），只有去重语义
    pub friends: Vec<String>,

    /// 书架 + 阅读历史
    pub library: Library,
}

/// 好友查找返回的公开资料
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendProfile {
    pub username: String,
    pub date_joined: DateTime<Utc>,
    pub profile_image: String,
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 根据内部 ID 加载完整用户文档
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError>;

    /// 根据公开别名查找公开资料
    async fn find_profile_by_public_id(
        &self,
        public_id: &str,
    ) -> Result<Option<FriendProfile>, RepositoryError>;

    /// 批量查找好友公开资料
    async fn find_friend_profiles(
        &self,
        public_ids: &[String],
    ) -> Result<Vec<FriendProfile>, RepositoryError>;

    /// 整体写回用户文档（原子替换，last-writer-wins）
    async fn save(&self, user: &UserRecord) -> Result<(), RepositoryError>;
}

// ============================================================================
// Catalog Repository
// ============================================================================

/// 已完结小说目录条目
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedNovelRecord {
    pub title: String,
    pub novel_url: String,
    pub chapter_count: u32,
    pub image_url: String,
}

/// Catalog Repository Port
///
/// 目录存储由定时刷新任务显式持有并注入，不是进程级单例
#[async_trait]
pub trait CatalogRepositoryPort: Send + Sync {
    /// 按 novel_url upsert 整批目录条目
    async fn upsert_all(&self, novels: &[CompletedNovelRecord]) -> Result<usize, RepositoryError>;

    /// 列出目录，按章节数降序
    async fn list(&self) -> Result<Vec<CompletedNovelRecord>, RepositoryError>;
}
