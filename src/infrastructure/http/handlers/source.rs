//! Source HTTP Handlers
//!
//! 来源站代理端点。客户端不直接访问来源站，
//! 抓取与解析都发生在服务端。

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{GetChapterContent, GetNovelInfo, SearchNovels};
use crate::domain::library::ChapterStub;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NovelInfoParams {
    pub novel_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ChapterContentParams {
    pub chapter_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelInfoDto {
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_url: String,
    pub number_of_chapters: usize,
    pub chapters: Vec<ChapterStub>,
}

#[derive(Debug, Serialize)]
pub struct ChapterContentDto {
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitDto {
    pub title: String,
    pub novel_url: String,
    pub image_url: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// 来源站小说信息与完整章节列表
pub async fn get_novel_info(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NovelInfoParams>,
) -> Result<Json<ApiResponse<NovelInfoDto>>, ApiError> {
    let info = state
        .get_novel_info_handler
        .handle(GetNovelInfo {
            novel_url: params.novel_url,
        })
        .await?;

    Ok(Json(ApiResponse::success(NovelInfoDto {
        title: info.title,
        author: info.author,
        description: info.description,
        cover_url: info.cover_url,
        number_of_chapters: info.chapters.len(),
        chapters: info.chapters,
    })))
}

/// 来源站章节正文
pub async fn get_chapter_content(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChapterContentParams>,
) -> Result<Json<ApiResponse<ChapterContentDto>>, ApiError> {
    let content = state
        .get_chapter_content_handler
        .handle(GetChapterContent {
            chapter_url: params.chapter_url,
        })
        .await?;

    Ok(Json(ApiResponse::success(ChapterContentDto { content })))
}

/// 来源站关键字搜索
pub async fn search_novels(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<SearchHitDto>>>, ApiError> {
    let hits = state
        .search_novels_handler
        .handle(SearchNovels {
            keyword: params.keyword,
        })
        .await?;

    let responses: Vec<SearchHitDto> = hits
        .into_iter()
        .map(|h| SearchHitDto {
            title: h.title,
            novel_url: h.novel_url,
            image_url: h.image_url,
        })
        .collect();

    Ok(Json(ApiResponse::success(responses)))
}
