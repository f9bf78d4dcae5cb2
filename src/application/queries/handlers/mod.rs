//! Query Handlers

mod catalog_handlers;
mod source_handlers;
mod user_handlers;

pub use catalog_handlers::ListCompletedNovelsHandler;
pub use source_handlers::{GetChapterContentHandler, GetNovelInfoHandler, SearchNovelsHandler};
pub use user_handlers::{
    GetUserDetailsHandler, LookupUserHandler, UserDetailsResponse, UserLookupResponse,
};
