//! User Query Handlers

use std::sync::Arc;
use chrono::{DateTime, Utc};

use crate::application::error::ApplicationError;
use crate::application::ports::{FriendProfile, UserRepositoryPort};
use crate::application::queries::{GetUserDetails, LookupUser};
use crate::domain::library::{HistoryEntry, LibraryEntry};

// ============================================================================
// Response DTOs
// ============================================================================

/// 用户详情响应
#[derive(Debug, Clone)]
pub struct UserDetailsResponse {
    pub username: String,
    pub public_id: String,
    pub date_joined: DateTime<Utc>,
    pub profile_image: String,
    pub theme: Option<String>,
    pub friends: Vec<FriendProfile>,
    pub novels: Vec<LibraryEntry>,
    pub history: Vec<HistoryEntry>,
}

/// 用户存在性查询响应
#[derive(Debug, Clone)]
pub struct UserLookupResponse {
    pub exists: bool,
    pub username: Option<String>,
    pub profile_image: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetUserDetails Handler
pub struct GetUserDetailsHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetUserDetailsHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: GetUserDetails) -> Result<UserDetailsResponse, ApplicationError> {
        let user = self
            .user_repo
            .find_by_id(query.user_id)
            .await?
            .ok_or(ApplicationError::UserNotFound(query.user_id))?;

        let friends = self.user_repo.find_friend_profiles(&user.friends).await?;

        Ok(UserDetailsResponse {
            username: user.username,
            public_id: user.public_id,
            date_joined: user.date_joined,
            profile_image: user.profile_image,
            theme: user.theme,
            friends,
            novels: user.library.novels().to_vec(),
            history: user.library.history().to_vec(),
        })
    }
}

/// LookupUser Handler - 好友添加前的存在性检查
pub struct LookupUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl LookupUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: LookupUser) -> Result<UserLookupResponse, ApplicationError> {
        match self
            .user_repo
            .find_profile_by_public_id(&query.public_id)
            .await?
        {
            Some(profile) => Ok(UserLookupResponse {
                exists: true,
                username: Some(profile.username),
                profile_image: Some(profile.profile_image),
            }),
            None => Ok(UserLookupResponse {
                exists: false,
                username: None,
                profile_image: None,
            }),
        }
    }
}
