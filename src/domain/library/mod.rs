//! Library Context - 书架限界上下文
//!
//! 职责:
//! - 用户书架聚合（小说条目 + 阅读历史）
//! - 阅读进度状态转移（收藏、最后阅读位置、章节已读集合）
//! - 历史 feed 调和（最近触达在前、按标题去重、有界）

mod aggregate;
mod entry;
mod errors;
mod history;

pub use aggregate::{AddOutcome, Library};
pub use entry::{ChapterRead, ChapterStub, LibraryEntry, NovelDetails};
pub use errors::LibraryError;
pub use history::{HistoryEntry, MAX_HISTORY_ENTRIES};
