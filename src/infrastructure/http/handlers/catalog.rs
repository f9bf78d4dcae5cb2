//! Catalog HTTP Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::ListCompletedNovels;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedNovelDto {
    pub title: String,
    pub novel_url: String,
    pub chapter_count: u32,
    pub image_url: String,
}

/// 已完结小说目录（按章节数降序）
pub async fn list_completed_novels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CompletedNovelDto>>>, ApiError> {
    let result = state
        .list_completed_novels_handler
        .handle(ListCompletedNovels)
        .await?;

    let responses: Vec<CompletedNovelDto> = result
        .into_iter()
        .map(|n| CompletedNovelDto {
            title: n.title,
            novel_url: n.novel_url,
            chapter_count: n.chapter_count,
            image_url: n.image_url,
        })
        .collect();

    Ok(Json(ApiResponse::success(responses)))
}
