//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 来源站配置
    #[serde(default)]
    pub source: SourceConfig,

    /// 目录刷新配置
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// 认证配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/shujia.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 来源站配置
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// 来源站基础 URL
    #[serde(default = "default_source_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u64,
}

fn default_source_url() -> String {
    "https://novelfull.net".to_string()
}

fn default_source_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_url(),
            timeout_secs: default_source_timeout(),
        }
    }
}

/// 目录刷新配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// 是否启用定时刷新
    #[serde(default = "default_refresh_enabled")]
    pub refresh_enabled: bool,

    /// 刷新间隔（秒）
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// 目录收录的最小章节数
    #[serde(default = "default_min_chapter_count")]
    pub min_chapter_count: u32,
}

fn default_refresh_enabled() -> bool {
    true
}

fn default_refresh_interval() -> u64 {
    86400 // 每日一次
}

fn default_min_chapter_count() -> u32 {
    500
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            refresh_enabled: default_refresh_enabled(),
            refresh_interval_secs: default_refresh_interval(),
            min_chapter_count: default_min_chapter_count(),
        }
    }
}

/// 认证配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// 会话令牌有效期（天）
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,

    /// 密码重置码有效期（秒）
    #[serde(default = "default_reset_code_ttl")]
    pub reset_code_ttl_secs: i64,
}

fn default_token_ttl_days() -> i64 {
    30
}

fn default_reset_code_ttl() -> i64 {
    300 // 5 分钟
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_days: default_token_ttl_days(),
            reset_code_ttl_secs: default_reset_code_ttl(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.database.path, "data/shujia.db");
        assert_eq!(config.source.base_url, "https://novelfull.net");
        assert_eq!(config.catalog.min_chapter_count, 500);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/shujia.db?mode=rwc");
    }
}
