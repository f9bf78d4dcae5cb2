//! Identity Port - 认证协作方
//!
//! 凭证存储与校验对核心不可见，核心只消费"已解析的认证用户身份"。
//! 密码哈希、令牌签发都在 infrastructure 的实现里。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// 认证错误
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already used")]
    EmailTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid or expired reset code")]
    InvalidResetCode,

    #[error("Identity storage error: {0}")]
    Storage(String),
}

/// 签发的会话令牌
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// 密码重置码（6 位数字，短期有效）
#[derive(Debug, Clone)]
pub struct ResetCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity Port
#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// 注册新用户（用户名与邮箱唯一），返回首个会话令牌
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthToken, IdentityError>;

    /// 用户名 + 密码登录
    async fn login(&self, username: &str, password: &str) -> Result<AuthToken, IdentityError>;

    /// 校验令牌，有效则返回用户 ID
    async fn verify_token(&self, token: &str) -> Result<Option<Uuid>, IdentityError>;

    /// 为邮箱签发密码重置码；邮箱不存在时返回 None（调用方不暴露差异）
    async fn issue_reset_code(&self, email: &str) -> Result<Option<ResetCode>, IdentityError>;

    /// 校验重置码是否对该邮箱有效（不消费码）
    async fn verify_reset_code(&self, email: &str, code: &str) -> Result<bool, IdentityError>;

    /// 用有效重置码设置新密码，并清除该码
    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;
}
