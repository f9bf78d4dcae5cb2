//! Command Handlers

mod auth_handlers;
mod catalog_handlers;
mod library_handlers;
mod user_handlers;

pub use auth_handlers::{
    LogInHandler, RequestPasswordResetHandler, ResetPasswordHandler, SignUpHandler, TokenResponse,
    ValidateTokenHandler, ValidationResponse, VerifyResetCodeHandler,
};
pub use catalog_handlers::{RefreshCompletedNovelsHandler, RefreshResponse};
pub use library_handlers::{
    AddNovelHandler, AddNovelResponse, MarkChapterReadHandler, RecordEngagementHandler,
    SetFavoriteHandler, UnmarkChapterReadHandler, UpdateLastReadHandler,
};
pub use user_handlers::{AddFriendHandler, UpdateThemeHandler};
