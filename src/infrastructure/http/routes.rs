//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                       GET   健康检查
//! - /api/auth/signup                POST  注册并签发令牌
//! - /api/auth/login                 POST  登录并签发令牌
//! - /api/auth/validate              POST  校验令牌
//! - /api/auth/forgot_password       POST  请求密码重置码
//! - /api/auth/verify_reset_code     POST  校验重置码
//! - /api/auth/reset_password        POST  用重置码设置新密码
//! - /api/user/details               GET   当前用户完整资料（含书架与历史）
//! - /api/user/add_friend            POST  按公开 ID 添加好友
//! - /api/user/exists/{public_id}    GET   按公开 ID 查询用户存在性
//! - /api/user/update_theme          POST  更新界面主题
//! - /api/library/add_novel          POST  加入书架（标题唯一）
//! - /api/library/favorite           POST  设置收藏标记
//! - /api/library/last_read          POST  更新最后阅读章节
//! - /api/library/chapter_read       POST  标记章节已读（按章节号覆盖）
//! - /api/library/chapter_unread     POST  取消章节已读
//! - /api/library/history            POST  记录阅读轨迹快照
//! - /api/catalog/completed          GET   已完结小说目录
//! - /api/source/chapters            GET   来源站小说信息与章节列表
//! - /api/source/chapter_content     GET   来源站章节正文
//! - /api/source/search              GET   来源站关键字搜索

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/auth", auth_routes())
        .nest("/user", user_routes())
        .nest("/library", library_routes())
        .nest("/catalog", catalog_routes())
        .nest("/source", source_routes())
}

/// Auth 路由
fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(handlers::sign_up))
        .route("/login", post(handlers::log_in))
        .route("/validate", post(handlers::validate_token))
        .route("/forgot_password", post(handlers::forgot_password))
        .route("/verify_reset_code", post(handlers::verify_reset_code))
        .route("/reset_password", post(handlers::reset_password))
}

/// User 路由
fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/details", get(handlers::get_user_details))
        .route("/add_friend", post(handlers::add_friend))
        .route("/exists/:public_id", get(handlers::user_exists))
        .route("/update_theme", post(handlers::update_theme))
}

/// Library 路由
fn library_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add_novel", post(handlers::add_novel))
        .route("/favorite", post(handlers::set_favorite))
        .route("/last_read", post(handlers::update_last_read))
        .route("/chapter_read", post(handlers::mark_chapter_read))
        .route("/chapter_unread", post(handlers::unmark_chapter_read))
        .route("/history", post(handlers::record_history))
}

/// Catalog 路由
fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new().route("/completed", get(handlers::list_completed_novels))
}

/// Source 路由
fn source_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chapters", get(handlers::get_novel_info))
        .route("/chapter_content", get(handlers::get_chapter_content))
        .route("/search", get(handlers::search_novels))
}
