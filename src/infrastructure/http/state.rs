//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddFriendHandler, AddNovelHandler, LogInHandler, MarkChapterReadHandler,
    RecordEngagementHandler, RequestPasswordResetHandler, ResetPasswordHandler,
    SetFavoriteHandler, SignUpHandler, UnmarkChapterReadHandler, UpdateLastReadHandler,
    UpdateThemeHandler, ValidateTokenHandler, VerifyResetCodeHandler,
    // Query handlers
    GetChapterContentHandler, GetNovelInfoHandler, GetUserDetailsHandler,
    ListCompletedNovelsHandler, LookupUserHandler, SearchNovelsHandler,
    // Ports
    CatalogRepositoryPort, IdentityPort, NovelSourcePort, UserRepositoryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub user_repo: Arc<dyn UserRepositoryPort>,
    pub catalog_repo: Arc<dyn CatalogRepositoryPort>,
    pub identity: Arc<dyn IdentityPort>,
    pub novel_source: Arc<dyn NovelSourcePort>,

    // ========== Command Handlers ==========
    pub sign_up_handler: SignUpHandler,
    pub log_in_handler: LogInHandler,
    pub validate_token_handler: ValidateTokenHandler,
    pub password_reset_handler: RequestPasswordResetHandler,
    pub verify_reset_code_handler: VerifyResetCodeHandler,
    pub reset_password_handler: ResetPasswordHandler,
    pub add_novel_handler: AddNovelHandler,
    pub set_favorite_handler: SetFavoriteHandler,
    pub update_last_read_handler: UpdateLastReadHandler,
    pub mark_chapter_read_handler: MarkChapterReadHandler,
    pub unmark_chapter_read_handler: UnmarkChapterReadHandler,
    pub record_engagement_handler: RecordEngagementHandler,
    pub add_friend_handler: AddFriendHandler,
    pub update_theme_handler: UpdateThemeHandler,

    // ========== Query Handlers ==========
    pub get_user_details_handler: GetUserDetailsHandler,
    pub lookup_user_handler: LookupUserHandler,
    pub list_completed_novels_handler: ListCompletedNovelsHandler,
    pub get_novel_info_handler: GetNovelInfoHandler,
    pub get_chapter_content_handler: GetChapterContentHandler,
    pub search_novels_handler: SearchNovelsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        catalog_repo: Arc<dyn CatalogRepositoryPort>,
        identity: Arc<dyn IdentityPort>,
        novel_source: Arc<dyn NovelSourcePort>,
    ) -> Self {
        Self {
            // Ports
            user_repo: user_repo.clone(),
            catalog_repo: catalog_repo.clone(),
            identity: identity.clone(),
            novel_source: novel_source.clone(),

            // Command handlers
            sign_up_handler: SignUpHandler::new(identity.clone()),
            log_in_handler: LogInHandler::new(identity.clone()),
            validate_token_handler: ValidateTokenHandler::new(identity.clone()),
            password_reset_handler: RequestPasswordResetHandler::new(identity.clone()),
            verify_reset_code_handler: VerifyResetCodeHandler::new(identity.clone()),
            reset_password_handler: ResetPasswordHandler::new(identity.clone()),
            add_novel_handler: AddNovelHandler::new(user_repo.clone()),
            set_favorite_handler: SetFavoriteHandler::new(user_repo.clone()),
            update_last_read_handler: UpdateLastReadHandler::new(user_repo.clone()),
            mark_chapter_read_handler: MarkChapterReadHandler::new(user_repo.clone()),
            unmark_chapter_read_handler: UnmarkChapterReadHandler::new(user_repo.clone()),
            record_engagement_handler: RecordEngagementHandler::new(user_repo.clone()),
            add_friend_handler: AddFriendHandler::new(user_repo.clone()),
            update_theme_handler: UpdateThemeHandler::new(user_repo.clone()),

            // Query handlers
            get_user_details_handler: GetUserDetailsHandler::new(user_repo.clone()),
            lookup_user_handler: LookupUserHandler::new(user_repo.clone()),
            list_completed_novels_handler: ListCompletedNovelsHandler::new(catalog_repo.clone()),
            get_novel_info_handler: GetNovelInfoHandler::new(novel_source.clone()),
            get_chapter_content_handler: GetChapterContentHandler::new(novel_source.clone()),
            search_novels_handler: SearchNovelsHandler::new(novel_source.clone()),
        }
    }
}
