//! 应用层错误定义
//!
//! 统一的命令/查询错误类型，按 NotFound 的具体资源细分

use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{IdentityError, RepositoryError, SourceError};
use crate::domain::library::LibraryError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 未认证或令牌无效
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 用户不存在
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// 小说不在用户书架中
    #[error("Novel not found: {0}")]
    NovelNotFound(String),

    /// 章节已读记录不存在（与小说缺失区分开）
    #[error("Chapter read not found: {title} chapter {chapter}")]
    ChapterReadNotFound { title: String, chapter: u32 },

    /// 请求形状/字段验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 凭证错误（用户名或密码不正确）
    #[error("Invalid credentials: {0}")]
    CredentialError(String),

    /// 仓储错误，原样转发，核心不重试也不解释
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务（来源站抓取）错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<LibraryError> for ApplicationError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::NovelNotFound(title) => Self::NovelNotFound(title),
            LibraryError::ChapterReadNotFound { title, chapter } => {
                Self::ChapterReadNotFound { title, chapter }
            }
        }
    }
}

impl From<IdentityError> for ApplicationError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::UsernameTaken => {
                Self::ValidationError("Username already exists".to_string())
            }
            IdentityError::EmailTaken => Self::ValidationError("Email already used".to_string()),
            IdentityError::InvalidCredentials => {
                Self::CredentialError("Invalid username or password".to_string())
            }
            IdentityError::InvalidResetCode => {
                Self::ValidationError("Invalid or expired reset code".to_string())
            }
            IdentityError::Storage(msg) => Self::RepositoryError(msg),
        }
    }
}

impl From<SourceError> for ApplicationError {
    fn from(err: SourceError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}
