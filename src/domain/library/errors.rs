//! Library Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// 书架中不存在该标题
    #[error("小说不在书架中: {0}")]
    NovelNotFound(String),

    /// 该小说没有对应章节的已读记录
    #[error("章节已读记录不存在: {title} 第 {chapter} 章")]
    ChapterReadNotFound { title: String, chapter: u32 },
}
