//! User HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{AddFriend, FriendProfile, GetUserDetails, LookupUser, UpdateTheme};
use crate::domain::library::{HistoryEntry, LibraryEntry};
use crate::infrastructure::http::auth::AuthUser;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsDto {
    pub username: String,
    pub public_id: String,
    pub date_joined: DateTime<Utc>,
    pub profile_image: String,
    pub theme: Option<String>,
    pub friends: Vec<FriendProfile>,
    pub novels: Vec<LibraryEntry>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFriendRequest {
    pub friend_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateThemeRequest {
    pub theme: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserExistsDto {
    pub exists: bool,
    pub username: Option<String>,
    pub profile_image: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 当前用户完整资料（含好友、书架与阅读历史）
pub async fn get_user_details(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<UserDetailsDto>>, ApiError> {
    let result = state
        .get_user_details_handler
        .handle(GetUserDetails { user_id })
        .await?;

    Ok(Json(ApiResponse::success(UserDetailsDto {
        username: result.username,
        public_id: result.public_id,
        date_joined: result.date_joined,
        profile_image: result.profile_image,
        theme: result.theme,
        friends: result.friends,
        novels: result.novels,
        history: result.history,
    })))
}

/// 按公开 ID 添加好友
pub async fn add_friend(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<AddFriendRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .add_friend_handler
        .handle(AddFriend {
            user_id,
            friend_id: req.friend_id,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 按公开 ID 查询用户是否存在
pub async fn user_exists(
    State(state): State<Arc<AppState>>,
    AuthUser(_user_id): AuthUser,
    Path(public_id): Path<String>,
) -> Result<Json<ApiResponse<UserExistsDto>>, ApiError> {
    let result = state
        .lookup_user_handler
        .handle(LookupUser { public_id })
        .await?;

    Ok(Json(ApiResponse::success(UserExistsDto {
        exists: result.exists,
        username: result.username,
        profile_image: result.profile_image,
    })))
}

/// 更新界面主题
pub async fn update_theme(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateThemeRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .update_theme_handler
        .handle(UpdateTheme {
            user_id,
            theme: req.theme,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
