//! Library Commands
//!
//! 书架状态转移命令，每条命令对应一次 加载 → 单条目修改 → 整体写回

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::library::NovelDetails;

/// 加入小说命令（标题重复时幂等）
#[derive(Debug, Clone)]
pub struct AddNovel {
    pub user_id: Uuid,
    pub details: NovelDetails,
}

/// 设置收藏标记命令
#[derive(Debug, Clone)]
pub struct SetFavorite {
    pub user_id: Uuid,
    pub title: String,
    pub favorite: bool,
}

/// 更新最后阅读位置命令
#[derive(Debug, Clone)]
pub struct UpdateLastRead {
    pub user_id: Uuid,
    pub title: String,
    pub chapter: u32,
}

/// 标记章节已读命令（按章节号 upsert）
#[derive(Debug, Clone)]
pub struct MarkChapterRead {
    pub user_id: Uuid,
    pub title: String,
    pub chapter: u32,

    /// 章节内进度，可选
    pub progress: Option<f64>,

    /// 显式时间戳，不提供时取当前时刻
    pub read_at: Option<DateTime<Utc>>,
}

/// 取消章节已读命令
#[derive(Debug, Clone)]
pub struct UnmarkChapterRead {
    pub user_id: Uuid,
    pub title: String,
    pub chapter: u32,
}

/// 记录阅读触达命令（历史 feed 的唯一写入路径）
#[derive(Debug, Clone)]
pub struct RecordEngagement {
    pub user_id: Uuid,
    pub title: String,
}
