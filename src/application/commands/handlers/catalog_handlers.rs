//! Catalog Command Handlers

use std::sync::Arc;

use crate::application::commands::RefreshCompletedNovels;
use crate::application::error::ApplicationError;
use crate::application::ports::{CatalogRepositoryPort, NovelSourcePort};

/// 刷新结果
#[derive(Debug, Clone)]
pub struct RefreshResponse {
    pub fetched: usize,
    pub stored: usize,
}

/// RefreshCompletedNovels Handler
///
/// 抓取来源站全部目录页，过滤章节数过少的条目，按章节数降序
/// 后整批 upsert 进目录存储。目录存储是注入的，不是进程级单例。
pub struct RefreshCompletedNovelsHandler {
    source: Arc<dyn NovelSourcePort>,
    catalog_repo: Arc<dyn CatalogRepositoryPort>,
    min_chapter_count: u32,
}

impl RefreshCompletedNovelsHandler {
    pub fn new(
        source: Arc<dyn NovelSourcePort>,
        catalog_repo: Arc<dyn CatalogRepositoryPort>,
        min_chapter_count: u32,
    ) -> Self {
        Self {
            source,
            catalog_repo,
            min_chapter_count,
        }
    }

    pub async fn handle(
        &self,
        _command: RefreshCompletedNovels,
    ) -> Result<RefreshResponse, ApplicationError> {
        let mut novels = self.source.fetch_completed_novels().await?;
        let fetched = novels.len();

        novels.retain(|n| n.chapter_count >= self.min_chapter_count);
        novels.sort_by(|a, b| b.chapter_count.cmp(&a.chapter_count));

        let stored = self.catalog_repo.upsert_all(&novels).await?;

        tracing::info!(fetched, stored, "Completed novels catalog refreshed");

        Ok(RefreshResponse { fetched, stored })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CompletedNovelRecord, RepositoryError, SearchHit, SourceError, SourceNovelInfo};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedSource {
        novels: Vec<CompletedNovelRecord>,
    }

    #[async_trait]
    impl NovelSourcePort for FixedSource {
        async fn fetch_novel_info(&self, _novel_url: &str) -> Result<SourceNovelInfo, SourceError> {
            Err(SourceError::Http("not implemented".to_string()))
        }

        async fn fetch_chapter_content(&self, _chapter_url: &str) -> Result<String, SourceError> {
            Err(SourceError::Http("not implemented".to_string()))
        }

        async fn search(&self, _keyword: &str) -> Result<Vec<SearchHit>, SourceError> {
            Ok(Vec::new())
        }

        async fn fetch_completed_novels(&self) -> Result<Vec<CompletedNovelRecord>, SourceError> {
            Ok(self.novels.clone())
        }
    }

    #[derive(Default)]
    struct RecordingCatalog {
        stored: Mutex<Vec<CompletedNovelRecord>>,
    }

    #[async_trait]
    impl CatalogRepositoryPort for RecordingCatalog {
        async fn upsert_all(
            &self,
            novels: &[CompletedNovelRecord],
        ) -> Result<usize, RepositoryError> {
            let mut stored = self.stored.lock().unwrap();
            *stored = novels.to_vec();
            Ok(novels.len())
        }

        async fn list(&self) -> Result<Vec<CompletedNovelRecord>, RepositoryError> {
            Ok(self.stored.lock().unwrap().clone())
        }
    }

    fn record(title: &str, chapter_count: u32) -> CompletedNovelRecord {
        CompletedNovelRecord {
            title: title.to_string(),
            novel_url: format!("https://example.com/{}", title),
            chapter_count,
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_refresh_filters_and_sorts() {
        let source = Arc::new(FixedSource {
            novels: vec![record("short", 120), record("mid", 700), record("long", 1500)],
        });
        let catalog = Arc::new(RecordingCatalog::default());
        let handler = RefreshCompletedNovelsHandler::new(source, catalog.clone(), 500);

        let result = handler.handle(RefreshCompletedNovels).await.unwrap();

        assert_eq!(result.fetched, 3);
        assert_eq!(result.stored, 2);

        let stored = catalog.list().await.unwrap();
        assert_eq!(stored[0].title, "long");
        assert_eq!(stored[1].title, "mid");
    }
}
