//! Auth Command Handlers
//!
//! 认证是核心之外的协作方，这里只做 IdentityPort 的编排

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{
    LogIn, RequestPasswordReset, ResetPassword, SignUp, ValidateToken, VerifyResetCode,
};
use crate::application::error::ApplicationError;
use crate::application::ports::IdentityPort;

/// 签发令牌响应
#[derive(Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// SignUp Handler
pub struct SignUpHandler {
    identity: Arc<dyn IdentityPort>,
}

impl SignUpHandler {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, command: SignUp) -> Result<TokenResponse, ApplicationError> {
        if command.username.trim().is_empty() {
            return Err(ApplicationError::validation("Username is required"));
        }
        if command.email.trim().is_empty() {
            return Err(ApplicationError::validation("Email is required"));
        }
        if command.password.is_empty() {
            return Err(ApplicationError::validation("Password is required"));
        }

        let auth = self
            .identity
            .register(&command.username, &command.email, &command.password)
            .await?;

        tracing::info!(user_id = %auth.user_id, username = %command.username, "User created");

        Ok(TokenResponse {
            token: auth.token,
            user_id: auth.user_id,
        })
    }
}

/// LogIn Handler
pub struct LogInHandler {
    identity: Arc<dyn IdentityPort>,
}

impl LogInHandler {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, command: LogIn) -> Result<TokenResponse, ApplicationError> {
        let auth = self
            .identity
            .login(&command.username, &command.password)
            .await?;

        tracing::info!(user_id = %auth.user_id, "User logged in");

        Ok(TokenResponse {
            token: auth.token,
            user_id: auth.user_id,
        })
    }
}

/// 令牌校验响应
#[derive(Debug, Clone)]
pub struct ValidationResponse {
    pub valid: bool,
    pub user_id: Option<Uuid>,
}

/// ValidateToken Handler
pub struct ValidateTokenHandler {
    identity: Arc<dyn IdentityPort>,
}

impl ValidateTokenHandler {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, command: ValidateToken) -> Result<ValidationResponse, ApplicationError> {
        let user_id = self.identity.verify_token(&command.token).await?;
        Ok(ValidationResponse {
            valid: user_id.is_some(),
            user_id,
        })
    }
}

/// RequestPasswordReset Handler
///
/// 无论邮箱是否存在都成功返回，不向调用方泄露注册情况
pub struct RequestPasswordResetHandler {
    identity: Arc<dyn IdentityPort>,
}

impl RequestPasswordResetHandler {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, command: RequestPasswordReset) -> Result<(), ApplicationError> {
        if command.email.trim().is_empty() {
            return Err(ApplicationError::validation("Email is required"));
        }

        match self.identity.issue_reset_code(&command.email).await? {
            Some(code) => {
                // 邮件发送不在范围内，投递方式留给部署环境
                tracing::info!(
                    email = %command.email,
                    expires_at = %code.expires_at,
                    "Password reset code issued"
                );
            }
            None => {
                tracing::debug!(email = %command.email, "Reset requested for unknown email");
            }
        }

        Ok(())
    }
}

/// VerifyResetCode Handler
///
/// 码无效或过期时以验证错误返回，客户端据此提示重新请求
pub struct VerifyResetCodeHandler {
    identity: Arc<dyn IdentityPort>,
}

impl VerifyResetCodeHandler {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, command: VerifyResetCode) -> Result<(), ApplicationError> {
        if command.email.trim().is_empty() {
            return Err(ApplicationError::validation("Email is required"));
        }
        if command.code.trim().is_empty() {
            return Err(ApplicationError::validation("Reset code is required"));
        }

        let valid = self
            .identity
            .verify_reset_code(&command.email, &command.code)
            .await?;
        if !valid {
            return Err(ApplicationError::validation("Invalid or expired reset code"));
        }

        Ok(())
    }
}

/// ResetPassword Handler
pub struct ResetPasswordHandler {
    identity: Arc<dyn IdentityPort>,
}

impl ResetPasswordHandler {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    pub async fn handle(&self, command: ResetPassword) -> Result<(), ApplicationError> {
        if command.email.trim().is_empty() {
            return Err(ApplicationError::validation("Email is required"));
        }
        if command.code.trim().is_empty() {
            return Err(ApplicationError::validation("Reset code is required"));
        }
        if command.password.is_empty() {
            return Err(ApplicationError::validation("Password is required"));
        }

        self.identity
            .reset_password(&command.email, &command.code, &command.password)
            .await?;

        tracing::info!(email = %command.email, "Password reset completed");

        Ok(())
    }
}
