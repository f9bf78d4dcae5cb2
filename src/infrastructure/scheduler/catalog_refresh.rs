//! Catalog Refresh Worker - Background Completed-Novels Sync

use std::sync::Arc;
use std::time::Duration;

use crate::application::commands::handlers::RefreshCompletedNovelsHandler;
use crate::application::commands::RefreshCompletedNovels;
use crate::config::CatalogConfig;

/// 目录刷新 Worker
///
/// 后台定时任务，周期性地从来源站同步已完结小说目录。
/// 启动后立即执行一次，之后按配置的间隔重复。
pub struct CatalogRefreshWorker {
    config: CatalogConfig,
    handler: Arc<RefreshCompletedNovelsHandler>,
}

impl CatalogRefreshWorker {
    pub fn new(config: CatalogConfig, handler: Arc<RefreshCompletedNovelsHandler>) -> Self {
        Self { config, handler }
    }

    /// 启动 Worker
    pub async fn run(self) {
        if !self.config.refresh_enabled {
            tracing::info!("Catalog refresh disabled, worker not started");
            return;
        }

        tracing::info!(
            interval_secs = self.config.refresh_interval_secs,
            "CatalogRefreshWorker started"
        );

        let mut ticker =
            tokio::time::interval(Duration::from_secs(self.config.refresh_interval_secs));

        loop {
            // 第一次 tick 立即完成，启动即刻同步一次
            ticker.tick().await;

            match self.handler.handle(RefreshCompletedNovels).await {
                Ok(result) => {
                    tracing::info!(
                        fetched = result.fetched,
                        stored = result.stored,
                        "Catalog refresh completed"
                    );
                }
                Err(e) => {
                    // 刷新失败不退出，等下个周期重试
                    tracing::error!(error = %e, "Catalog refresh failed");
                }
            }
        }
    }
}
