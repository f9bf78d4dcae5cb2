//! Source Query Handlers - 来源站代理
//!
//! 抓取细节在 NovelSourcePort 的适配器里，这里只做参数验证与转发

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{NovelSourcePort, SearchHit, SourceNovelInfo};
use crate::application::queries::{GetChapterContent, GetNovelInfo, SearchNovels};

/// GetNovelInfo Handler
pub struct GetNovelInfoHandler {
    source: Arc<dyn NovelSourcePort>,
}

impl GetNovelInfoHandler {
    pub fn new(source: Arc<dyn NovelSourcePort>) -> Self {
        Self { source }
    }

    pub async fn handle(&self, query: GetNovelInfo) -> Result<SourceNovelInfo, ApplicationError> {
        if query.novel_url.trim().is_empty() {
            return Err(ApplicationError::validation("Novel URL is required"));
        }
        Ok(self.source.fetch_novel_info(&query.novel_url).await?)
    }
}

/// GetChapterContent Handler
pub struct GetChapterContentHandler {
    source: Arc<dyn NovelSourcePort>,
}

impl GetChapterContentHandler {
    pub fn new(source: Arc<dyn NovelSourcePort>) -> Self {
        Self { source }
    }

    pub async fn handle(&self, query: GetChapterContent) -> Result<String, ApplicationError> {
        if query.chapter_url.trim().is_empty() {
            return Err(ApplicationError::validation("Chapter URL is required"));
        }
        Ok(self.source.fetch_chapter_content(&query.chapter_url).await?)
    }
}

/// SearchNovels Handler
pub struct SearchNovelsHandler {
    source: Arc<dyn NovelSourcePort>,
}

impl SearchNovelsHandler {
    pub fn new(source: Arc<dyn NovelSourcePort>) -> Self {
        Self { source }
    }

    pub async fn handle(&self, query: SearchNovels) -> Result<Vec<SearchHit>, ApplicationError> {
        if query.keyword.trim().is_empty() {
            return Err(ApplicationError::validation("Search keyword is required"));
        }
        Ok(self.source.search(&query.keyword).await?)
    }
}
