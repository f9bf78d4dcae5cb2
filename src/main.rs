//! Shujia - 移动端小说阅读后端
//!
//! - Domain: library/ (Bounded Context)
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, adapters, scheduler

use std::sync::Arc;

use shujia::application::RefreshCompletedNovelsHandler;
use shujia::config::{load_config, print_config};
use shujia::infrastructure::adapters::NovelfullClient;
use shujia::infrastructure::http::{AppState, HttpServer, ServerConfig};
use shujia::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteCatalogRepository, SqliteIdentityService,
    SqliteUserRepository,
};
use shujia::infrastructure::scheduler::CatalogRefreshWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},shujia={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Shujia - 移动端小说阅读后端");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建端口适配器
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let catalog_repo = Arc::new(SqliteCatalogRepository::new(pool.clone()));
    let identity = Arc::new(SqliteIdentityService::new(pool, config.auth.clone()));
    let novel_source = Arc::new(
        NovelfullClient::new(&config.source)
            .map_err(|e| anyhow::anyhow!("Failed to build source client: {}", e))?,
    );

    // 启动目录刷新 Worker
    let refresh_handler = Arc::new(RefreshCompletedNovelsHandler::new(
        novel_source.clone(),
        catalog_repo.clone(),
        config.catalog.min_chapter_count,
    ));
    let worker = CatalogRefreshWorker::new(config.catalog.clone(), refresh_handler);
    tokio::spawn(worker.run());

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(user_repo, catalog_repo, identity, novel_source);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
