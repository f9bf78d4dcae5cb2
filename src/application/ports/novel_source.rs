//! Novel Source Port - 第三方小说站协作方
//!
//! 抓取/解析逻辑在 infrastructure 的适配器里，
//! 核心只消费结构化的小说/章节/搜索记录

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::repositories::CompletedNovelRecord;
use crate::domain::library::ChapterStub;

/// 来源站错误
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source request failed: {0}")]
    Http(String),

    #[error("Failed to parse source page: {0}")]
    Parse(String),
}

/// 小说信息 + 完整章节列表
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceNovelInfo {
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_url: String,
    pub chapters: Vec<ChapterStub>,
}

/// 搜索结果条目
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub title: String,
    pub novel_url: String,
    pub image_url: String,
}

/// Novel Source Port
#[async_trait]
pub trait NovelSourcePort: Send + Sync {
    /// 抓取小说信息和全部章节列表（跟随分页）
    async fn fetch_novel_info(&self, novel_url: &str) -> Result<SourceNovelInfo, SourceError>;

    /// 抓取并清洗单章正文
    async fn fetch_chapter_content(&self, chapter_url: &str) -> Result<String, SourceError>;

    /// 按关键字搜索小说
    async fn search(&self, keyword: &str) -> Result<Vec<SearchHit>, SourceError>;

    /// 抓取已完结小说目录（跟随分页，不过滤不排序）
    async fn fetch_completed_novels(&self) -> Result<Vec<CompletedNovelRecord>, SourceError>;
}
