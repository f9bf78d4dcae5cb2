//! HTTP Handlers

mod auth;
mod catalog;
mod library;
mod ping;
mod source;
mod user;

pub use auth::*;
pub use catalog::*;
pub use library::*;
pub use ping::*;
pub use source::*;
pub use user::*;
