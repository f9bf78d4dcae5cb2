//! Catalog Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CatalogRepositoryPort, CompletedNovelRecord};
use crate::application::queries::ListCompletedNovels;

/// ListCompletedNovels Handler
pub struct ListCompletedNovelsHandler {
    catalog_repo: Arc<dyn CatalogRepositoryPort>,
}

impl ListCompletedNovelsHandler {
    pub fn new(catalog_repo: Arc<dyn CatalogRepositoryPort>) -> Self {
        Self { catalog_repo }
    }

    pub async fn handle(
        &self,
        _query: ListCompletedNovels,
    ) -> Result<Vec<CompletedNovelRecord>, ApplicationError> {
        Ok(self.catalog_repo.list().await?)
    }
}
