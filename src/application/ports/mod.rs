//! 应用层端口定义

mod identity;
mod novel_source;
mod repositories;

pub use identity::{AuthToken, IdentityError, IdentityPort, ResetCode};
pub use novel_source::{NovelSourcePort, SearchHit, SourceError, SourceNovelInfo};
pub use repositories::{
    CatalogRepositoryPort, CompletedNovelRecord, FriendProfile, RepositoryError, UserRecord,
    UserRepositoryPort,
};
