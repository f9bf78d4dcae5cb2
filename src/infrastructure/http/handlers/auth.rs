//! Auth HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    LogIn, RequestPasswordReset, ResetPassword, SignUp, ValidateToken, VerifyResetCode,
};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LogInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyResetCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDto {
    pub token: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDto {
    pub valid: bool,
    pub user_id: Option<Uuid>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 注册新用户，成功即签发令牌
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<ApiResponse<TokenDto>>, ApiError> {
    let result = state
        .sign_up_handler
        .handle(SignUp {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::success(TokenDto {
        token: result.token,
        user_id: result.user_id,
    })))
}

/// 登录
pub async fn log_in(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogInRequest>,
) -> Result<Json<ApiResponse<TokenDto>>, ApiError> {
    let result = state
        .log_in_handler
        .handle(LogIn {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::success(TokenDto {
        token: result.token,
        user_id: result.user_id,
    })))
}

/// 校验令牌有效性（无效令牌也是正常响应，valid=false）
pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ApiResponse<ValidationDto>>, ApiError> {
    let result = state
        .validate_token_handler
        .handle(ValidateToken { token: req.token })
        .await?;

    Ok(Json(ApiResponse::success(ValidationDto {
        valid: result.valid,
        user_id: result.user_id,
    })))
}

/// 请求密码重置码（不泄露邮箱是否注册，总是返回成功）
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .password_reset_handler
        .handle(RequestPasswordReset { email: req.email })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 校验重置码（无效或过期返回 errno 400）
pub async fn verify_reset_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyResetCodeRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .verify_reset_code_handler
        .handle(VerifyResetCode {
            email: req.email,
            code: req.code,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 用重置码设置新密码
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .reset_password_handler
        .handle(ResetPassword {
            email: req.email,
            code: req.code,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
