//! Library HTTP Handlers
//!
//! 书架写操作。所有端点都要求 Bearer 令牌，
//! 小说实体以标题为键，重复加入不报错（novelAdded=false）。

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    AddNovel, MarkChapterRead, RecordEngagement, SetFavorite, UnmarkChapterRead, UpdateLastRead,
};
use crate::domain::library::{ChapterRead, LibraryEntry, NovelDetails};
use crate::infrastructure::http::auth::AuthUser;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNovelDto {
    pub novel_added: bool,
    pub novel: LibraryEntry,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub title: String,
    pub favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoriteDto {
    pub favorite: bool,
}

#[derive(Debug, Deserialize)]
pub struct LastReadRequest {
    pub title: String,
    pub chapter: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterReadRequest {
    pub title: String,
    pub chapter: u32,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ChapterUnreadRequest {
    pub title: String,
    pub chapter: u32,
}

#[derive(Debug, Deserialize)]
pub struct HistoryRequest {
    pub title: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// 加入书架（按标题去重）
pub async fn add_novel(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(details): Json<NovelDetails>,
) -> Result<Json<ApiResponse<AddNovelDto>>, ApiError> {
    let result = state
        .add_novel_handler
        .handle(AddNovel { user_id, details })
        .await?;

    Ok(Json(ApiResponse::success(AddNovelDto {
        novel_added: result.added,
        novel: result.entry,
    })))
}

/// 设置收藏标记
pub async fn set_favorite(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<FavoriteRequest>,
) -> Result<Json<ApiResponse<FavoriteDto>>, ApiError> {
    let favorite = state
        .set_favorite_handler
        .handle(SetFavorite {
            user_id,
            title: req.title,
            favorite: req.favorite,
        })
        .await?;

    Ok(Json(ApiResponse::success(FavoriteDto { favorite })))
}

/// 更新最后阅读章节
pub async fn update_last_read(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<LastReadRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .update_last_read_handler
        .handle(UpdateLastRead {
            user_id,
            title: req.title,
            chapter: req.chapter,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 标记章节已读（同一章节号重复标记为覆盖更新）
pub async fn mark_chapter_read(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<ChapterReadRequest>,
) -> Result<Json<ApiResponse<ChapterRead>>, ApiError> {
    let entry = state
        .mark_chapter_read_handler
        .handle(MarkChapterRead {
            user_id,
            title: req.title,
            chapter: req.chapter,
            progress: req.progress,
            read_at: req.read_at,
        })
        .await?;

    Ok(Json(ApiResponse::success(entry)))
}

/// 取消章节已读
pub async fn unmark_chapter_read(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<ChapterUnreadRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .unmark_chapter_read_handler
        .handle(UnmarkChapterRead {
            user_id,
            title: req.title,
            chapter: req.chapter,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 记录阅读轨迹快照（去重后置顶）
pub async fn record_history(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<HistoryRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .record_engagement_handler
        .handle(RecordEngagement {
            user_id,
            title: req.title,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
