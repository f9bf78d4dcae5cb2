//! Library Context - Aggregate Root
//!
//! 一个用户的完整书架状态（小说集合 + 阅读历史）。
//!
//! 不变量:
//! - 书架内 title 唯一
//! - 历史按最近触达在前排序，每个 title 至多一条
//! - 历史只由 record_engagement 写入，其他操作不触碰历史

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{ChapterRead, LibraryEntry, NovelDetails};
use super::errors::LibraryError;
use super::history::{HistoryEntry, MAX_HISTORY_ENTRIES};

/// AddNovel 的结果: 重复标题是正常结果而不是错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}

/// Library 聚合根
///
/// 每次操作加载整个文档、修改单个条目、整体写回，
/// 并发请求遵循 last-writer-wins（见持久化层）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    novels: Vec<LibraryEntry>,

    #[serde(default)]
    history: Vec<HistoryEntry>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从持久化文档重建聚合
    pub fn from_parts(novels: Vec<LibraryEntry>, history: Vec<HistoryEntry>) -> Self {
        Self { novels, history }
    }

    // 书架规模很小，按标题线性扫描即可，不需要二级索引
    pub fn find(&self, title: &str) -> Option<&LibraryEntry> {
        self.novels.iter().find(|n| n.title == title)
    }

    fn find_mut(&mut self, title: &str) -> Result<&mut LibraryEntry, LibraryError> {
        self.novels
            .iter_mut()
            .find(|n| n.title == title)
            .ok_or_else(|| LibraryError::NovelNotFound(title.to_string()))
    }

    pub fn novels(&self) -> &[LibraryEntry] {
        &self.novels
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// 加入小说
    ///
    /// 标题已存在时是幂等 no-op，返回 AlreadyExists 和已有条目
    pub fn add_novel(
        &mut self,
        details: NovelDetails,
        now: DateTime<Utc>,
    ) -> (AddOutcome, &LibraryEntry) {
        if let Some(index) = self.novels.iter().position(|n| n.title == details.title) {
            return (AddOutcome::AlreadyExists, &self.novels[index]);
        }

        self.novels.push(LibraryEntry::new(details, now));
        (AddOutcome::Added, self.novels.last().expect("just pushed"))
    }

    /// 设置收藏标记
    pub fn set_favorite(&mut self, title: &str, favorite: bool) -> Result<(), LibraryError> {
        let entry = self.find_mut(title)?;
        entry.is_favorite = favorite;
        Ok(())
    }

    /// 更新最后阅读位置
    pub fn update_last_read(
        &mut self,
        title: &str,
        chapter: u32,
        now: DateTime<Utc>,
    ) -> Result<(), LibraryError> {
        let entry = self.find_mut(title)?;
        entry.last_read_chapter = chapter;
        entry.last_read_at = now;
        Ok(())
    }

    /// 标记章节已读（按章节号 upsert）
    pub fn mark_chapter_read(
        &mut self,
        title: &str,
        chapter: u32,
        progress: Option<f64>,
        read_at: DateTime<Utc>,
    ) -> Result<ChapterRead, LibraryError> {
        let entry = self.find_mut(title)?;
        Ok(entry.upsert_chapter_read(chapter, progress, read_at).clone())
    }

    /// 取消章节已读标记
    ///
    /// 区分两种 NotFound: 小说不在书架 / 章节记录不存在
    pub fn unmark_chapter_read(&mut self, title: &str, chapter: u32) -> Result<(), LibraryError> {
        let entry = self.find_mut(title)?;
        if !entry.remove_chapter_read(chapter) {
            return Err(LibraryError::ChapterReadNotFound {
                title: title.to_string(),
                chapter,
            });
        }
        Ok(())
    }

    /// 记录一次阅读触达，维护历史 feed
    ///
    /// 只能对书架中已有的小说记录触达。对当前条目做快照，
    /// 移除历史中同标题的旧条目后插入队首，超出上限时截断尾部。
    pub fn record_engagement(
        &mut self,
        title: &str,
        now: DateTime<Utc>,
    ) -> Result<(), LibraryError> {
        let entry = self
            .find(title)
            .ok_or_else(|| LibraryError::NovelNotFound(title.to_string()))?;
        let snapshot = HistoryEntry::snapshot(entry, now);

        self.history.retain(|h| h.title != title);
        self.history.insert(0, snapshot);
        self.history.truncate(MAX_HISTORY_ENTRIES);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(title: &str) -> NovelDetails {
        NovelDetails {
            title: title.to_string(),
            author: "A".to_string(),
            cover_url: "http://example.com/cover.jpg".to_string(),
            description: "desc".to_string(),
            number_of_chapters: 10,
            chapters: Vec::new(),
        }
    }

    #[test]
    fn test_add_novel_is_idempotent_on_title() {
        let mut library = Library::new();
        let now = Utc::now();

        let (first, _) = library.add_novel(details("Example"), now);
        let (second, _) = library.add_novel(details("Example"), now);
        let (third, _) = library.add_novel(details("Example"), now);

        assert_eq!(first, AddOutcome::Added);
        assert_eq!(second, AddOutcome::AlreadyExists);
        assert_eq!(third, AddOutcome::AlreadyExists);
        assert_eq!(library.novels().len(), 1);
    }

    #[test]
    fn test_round_trip_defaults() {
        let mut library = Library::new();
        let now = Utc::now();

        library.add_novel(details("Example"), now);

        let entry = library.find("Example").unwrap();
        assert!(!entry.is_favorite);
        assert_eq!(entry.last_read_chapter, 0);
        assert!(entry.chapters_read.is_empty());
    }

    #[test]
    fn test_mark_chapter_read_upsert_idempotence() {
        let mut library = Library::new();
        let now = Utc::now();
        library.add_novel(details("Example"), now);

        library.mark_chapter_read("Example", 3, None, now).unwrap();
        let later = now + chrono::Duration::seconds(30);
        library.mark_chapter_read("Example", 3, None, later).unwrap();

        let entry = library.find("Example").unwrap();
        assert_eq!(entry.chapters_read.len(), 1);
        assert_eq!(entry.chapters_read[0].read_at, later);
    }

    #[test]
    fn test_operations_fail_for_unknown_title() {
        let mut library = Library::new();
        let now = Utc::now();

        assert!(matches!(
            library.set_favorite("Absent", true),
            Err(LibraryError::NovelNotFound(_))
        ));
        assert!(matches!(
            library.update_last_read("Absent", 1, now),
            Err(LibraryError::NovelNotFound(_))
        ));
        assert!(matches!(
            library.mark_chapter_read("Absent", 1, None, now),
            Err(LibraryError::NovelNotFound(_))
        ));
        assert!(matches!(
            library.record_engagement("Absent", now),
            Err(LibraryError::NovelNotFound(_))
        ));
    }

    #[test]
    fn test_unmark_distinguishes_notfound_variants() {
        let mut library = Library::new();
        let now = Utc::now();
        library.add_novel(details("Example"), now);

        assert!(matches!(
            library.unmark_chapter_read("Absent", 3),
            Err(LibraryError::NovelNotFound(_))
        ));
        assert!(matches!(
            library.unmark_chapter_read("Example", 3),
            Err(LibraryError::ChapterReadNotFound { chapter: 3, .. })
        ));
    }

    #[test]
    fn test_history_most_recent_first_without_duplicates() {
        let mut library = Library::new();
        let now = Utc::now();
        library.add_novel(details("T1"), now);
        library.add_novel(details("T2"), now);

        library.record_engagement("T1", now).unwrap();
        library.record_engagement("T2", now).unwrap();
        library.record_engagement("T1", now).unwrap();

        let titles: Vec<&str> = library.history().iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["T1", "T2"]);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut library = Library::new();
        let now = Utc::now();

        for i in 0..(MAX_HISTORY_ENTRIES + 10) {
            let title = format!("Novel {}", i);
            library.add_novel(details(&title), now);
            library.record_engagement(&title, now).unwrap();
        }

        assert_eq!(library.history().len(), MAX_HISTORY_ENTRIES);
        // 最旧的被截掉，最新的在队首
        assert_eq!(
            library.history()[0].title,
            format!("Novel {}", MAX_HISTORY_ENTRIES + 9)
        );
    }

    #[test]
    fn test_history_is_snapshot_not_reference() {
        let mut library = Library::new();
        let now = Utc::now();
        library.add_novel(
            NovelDetails {
                number_of_chapters: 20,
                ..details("Example")
            },
            now,
        );

        library.mark_chapter_read("Example", 3, None, now).unwrap();
        library.update_last_read("Example", 3, now).unwrap();
        library.record_engagement("Example", now).unwrap();

        assert_eq!(library.history().len(), 1);
        assert_eq!(library.history()[0].last_read_chapter, 3);
        assert_eq!(library.history()[0].chapters_read.len(), 1);
        assert_eq!(library.history()[0].chapters_read[0].chapter, 3);

        // 取消已读后书架条目变化，但历史快照保持过期状态
        library.unmark_chapter_read("Example", 3).unwrap();
        assert!(library.find("Example").unwrap().chapters_read.is_empty());
        assert_eq!(library.history()[0].chapters_read.len(), 1);
    }
}
