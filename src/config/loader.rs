//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SHUJIA_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SHUJIA_SERVER__HOST=127.0.0.1`
/// - `SHUJIA_SERVER__PORT=8080`
/// - `SHUJIA_DATABASE__PATH=/data/shujia.db`
/// - `SHUJIA_SOURCE__BASE_URL=https://mirror.example.com`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("database.path", "data/shujia.db")?
        .set_default("database.max_connections", 5)?
        .set_default("source.base_url", "https://novelfull.net")?
        .set_default("source.timeout_secs", 30)?
        .set_default("catalog.refresh_enabled", true)?
        .set_default("catalog.refresh_interval_secs", 86400)?
        .set_default("catalog.min_chapter_count", 500)?
        .set_default("auth.token_ttl_days", 30)?
        .set_default("auth.reset_code_ttl_secs", 300)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），前缀 SHUJIA_，层级分隔符 __
    builder = builder.add_source(
        Environment::with_prefix("SHUJIA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.source.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Source base URL cannot be empty".to_string(),
        ));
    }

    if config.catalog.refresh_enabled && config.catalog.refresh_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Catalog refresh interval cannot be 0 when refresh is enabled".to_string(),
        ));
    }

    if config.auth.token_ttl_days <= 0 {
        return Err(ConfigError::ValidationError(
            "Token TTL must be positive".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Source: {}", config.source.base_url);
    tracing::info!("Catalog Refresh Enabled: {}", config.catalog.refresh_enabled);
    if config.catalog.refresh_enabled {
        tracing::info!("Catalog Refresh Interval: {}s", config.catalog.refresh_interval_secs);
    }
    tracing::info!("Token TTL: {} days", config.auth.token_ttl_days);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_source_url() {
        let mut config = AppConfig::default();
        config.source.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_refresh_interval() {
        let mut config = AppConfig::default();
        config.catalog.refresh_interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
