//! Library Context - 阅读历史

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{ChapterRead, LibraryEntry};

/// 历史条目 - 某次"阅读触达"时刻书架条目的去范式化快照
///
/// 是副本而不是引用: 源条目后续变化不会反映到历史里，
/// 只有重新触达才会刷新快照
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub description: String,
    pub is_favorite: bool,
    pub number_of_chapters: u32,
    pub last_read_chapter: u32,
    pub last_read_at: DateTime<Utc>,

    #[serde(default)]
    pub chapters_read: Vec<ChapterRead>,
}

impl HistoryEntry {
    /// 对书架条目做快照，last_read_at 取触达时刻
    pub fn snapshot(entry: &LibraryEntry, engaged_at: DateTime<Utc>) -> Self {
        Self {
            title: entry.title.clone(),
            author: entry.author.clone(),
            cover_url: entry.cover_url.clone(),
            description: entry.description.clone(),
            is_favorite: entry.is_favorite,
            number_of_chapters: entry.number_of_chapters,
            last_read_chapter: entry.last_read_chapter,
            last_read_at: engaged_at,
            chapters_read: entry.chapters_read.clone(),
        }
    }
}

/// 历史条目上限，超出时从尾部（最旧）截断
pub const MAX_HISTORY_ENTRIES: usize = 50;
