//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（UserRepository、Catalog、Identity、NovelSource）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Auth commands
    LogIn,
    RequestPasswordReset,
    ResetPassword,
    SignUp,
    ValidateToken,
    VerifyResetCode,
    // Catalog commands
    RefreshCompletedNovels,
    // Library commands
    AddNovel,
    MarkChapterRead,
    RecordEngagement,
    SetFavorite,
    UnmarkChapterRead,
    UpdateLastRead,
    // User commands
    AddFriend,
    UpdateTheme,
    // Handlers
    handlers::{
        AddFriendHandler, AddNovelHandler, AddNovelResponse, LogInHandler, MarkChapterReadHandler,
        RecordEngagementHandler, RefreshCompletedNovelsHandler, RefreshResponse,
        RequestPasswordResetHandler, ResetPasswordHandler, SetFavoriteHandler, SignUpHandler,
        TokenResponse, UnmarkChapterReadHandler, UpdateLastReadHandler, UpdateThemeHandler,
        ValidateTokenHandler, ValidationResponse, VerifyResetCodeHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Catalog
    CatalogRepositoryPort,
    CompletedNovelRecord,
    // Identity
    AuthToken,
    IdentityError,
    IdentityPort,
    ResetCode,
    // Novel source
    NovelSourcePort,
    SearchHit,
    SourceError,
    SourceNovelInfo,
    // User repository
    FriendProfile,
    RepositoryError,
    UserRecord,
    UserRepositoryPort,
};

pub use queries::{
    // Catalog queries
    ListCompletedNovels,
    // Source queries
    GetChapterContent,
    GetNovelInfo,
    SearchNovels,
    // User queries
    GetUserDetails,
    LookupUser,
    // Handlers
    handlers::{
        GetChapterContentHandler, GetNovelInfoHandler, GetUserDetailsHandler,
        ListCompletedNovelsHandler, LookupUserHandler, SearchNovelsHandler, UserDetailsResponse,
        UserLookupResponse,
    },
};
