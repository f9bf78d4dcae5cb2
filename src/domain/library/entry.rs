//! Library Context - 书架条目实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 章节存根（加入书架时从来源站快照的章节列表项）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterStub {
    pub title: String,
    pub link: String,
}

/// 单章已读记录
///
/// 不变量: 在所属 LibraryEntry 内 chapter 唯一，
/// 重复标记按章节号原地更新而不是追加
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRead {
    pub chapter: u32,

    /// 章节内阅读进度（0.0 - 1.0），可选
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,

    pub read_at: DateTime<Utc>,
}

/// 加入书架时的小说元数据（来源站抓取结果，核心只消费不计算）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelDetails {
    pub title: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub cover_url: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub number_of_chapters: u32,

    #[serde(default)]
    pub chapters: Vec<ChapterStub>,
}

/// 书架条目 - 用户书架中的一本小说
///
/// 不变量:
/// - 同一用户书架内 title 唯一（插入前检查，不依赖存储层约束）
/// - chapters_read 内章节号唯一
/// - 核心不会自动删除条目
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub description: String,
    pub is_favorite: bool,
    pub number_of_chapters: u32,

    /// 加入书架时快照的章节列表
    #[serde(default)]
    pub chapters: Vec<ChapterStub>,

    pub last_read_chapter: u32,
    pub last_read_at: DateTime<Utc>,

    #[serde(default)]
    pub chapters_read: Vec<ChapterRead>,
}

impl LibraryEntry {
    /// 从来源元数据创建新条目
    ///
    /// favorite=false, last_read_chapter=0, chapters_read 为空
    pub fn new(details: NovelDetails, now: DateTime<Utc>) -> Self {
        Self {
            title: details.title,
            author: details.author,
            cover_url: details.cover_url,
            description: details.description,
            is_favorite: false,
            number_of_chapters: details.number_of_chapters,
            chapters: details.chapters,
            last_read_chapter: 0,
            last_read_at: now,
            chapters_read: Vec::new(),
        }
    }

    /// 按章节号查找已读记录
    pub fn chapter_read(&self, chapter: u32) -> Option<&ChapterRead> {
        self.chapters_read.iter().find(|c| c.chapter == chapter)
    }

    /// 按章节号 upsert 已读记录
    ///
    /// 已存在则原地更新 read_at（progress 仅在提供时覆盖），
    /// 不存在则插入新记录；任何情况下都不会产生重复章节号
    pub fn upsert_chapter_read(
        &mut self,
        chapter: u32,
        progress: Option<f64>,
        read_at: DateTime<Utc>,
    ) -> &ChapterRead {
        match self.chapters_read.iter_mut().position(|c| c.chapter == chapter) {
            Some(index) => {
                let record = &mut self.chapters_read[index];
                record.read_at = read_at;
                if progress.is_some() {
                    record.progress = progress;
                }
                &self.chapters_read[index]
            }
            None => {
                self.chapters_read.push(ChapterRead {
                    chapter,
                    progress,
                    read_at,
                });
                self.chapters_read.last().expect("just pushed")
            }
        }
    }

    /// 移除章节已读记录，返回是否存在
    pub fn remove_chapter_read(&mut self, chapter: u32) -> bool {
        match self.chapters_read.iter().position(|c| c.chapter == chapter) {
            Some(index) => {
                self.chapters_read.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(title: &str) -> NovelDetails {
        NovelDetails {
            title: title.to_string(),
            author: "A".to_string(),
            cover_url: String::new(),
            description: String::new(),
            number_of_chapters: 10,
            chapters: Vec::new(),
        }
    }

    #[test]
    fn test_new_entry_defaults() {
        let now = Utc::now();
        let entry = LibraryEntry::new(details("Example"), now);

        assert_eq!(entry.title, "Example");
        assert!(!entry.is_favorite);
        assert_eq!(entry.last_read_chapter, 0);
        assert!(entry.chapters_read.is_empty());
    }

    #[test]
    fn test_upsert_updates_in_place() {
        let now = Utc::now();
        let mut entry = LibraryEntry::new(details("Example"), now);

        entry.upsert_chapter_read(3, Some(0.5), now);
        let later = now + chrono::Duration::seconds(60);
        entry.upsert_chapter_read(3, None, later);

        assert_eq!(entry.chapters_read.len(), 1);
        assert_eq!(entry.chapters_read[0].read_at, later);
        // progress 未提供时保留旧值
        assert_eq!(entry.chapters_read[0].progress, Some(0.5));
    }

    #[test]
    fn test_remove_chapter_read() {
        let now = Utc::now();
        let mut entry = LibraryEntry::new(details("Example"), now);
        entry.upsert_chapter_read(3, None, now);

        assert!(entry.remove_chapter_read(3));
        assert!(!entry.remove_chapter_read(3));
        assert!(entry.chapters_read.is_empty());
    }
}
