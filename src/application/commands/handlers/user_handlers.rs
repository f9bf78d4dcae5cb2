//! User Command Handlers

use std::sync::Arc;

use crate::application::commands::{AddFriend, UpdateTheme};
use crate::application::error::ApplicationError;
use crate::application::ports::UserRepositoryPort;

/// AddFriend Handler - 好友集合只有去重语义
pub struct AddFriendHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl AddFriendHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: AddFriend) -> Result<(), ApplicationError> {
        let mut user = self
            .user_repo
            .find_by_id(command.user_id)
            .await?
            .ok_or(ApplicationError::UserNotFound(command.user_id))?;

        if user.friends.contains(&command.friend_id) {
            return Err(ApplicationError::validation("Already friends"));
        }

        // 目标别名必须指向真实用户
        if self
            .user_repo
            .find_profile_by_public_id(&command.friend_id)
            .await?
            .is_none()
        {
            return Err(ApplicationError::validation("Friend not found"));
        }

        user.friends.push(command.friend_id.clone());
        self.user_repo.save(&user).await?;

        tracing::info!(user_id = %command.user_id, friend = %command.friend_id, "Friend added");

        Ok(())
    }
}

/// UpdateTheme Handler
pub struct UpdateThemeHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UpdateThemeHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: UpdateTheme) -> Result<(), ApplicationError> {
        let mut user = self
            .user_repo
            .find_by_id(command.user_id)
            .await?
            .ok_or(ApplicationError::UserNotFound(command.user_id))?;

        user.theme = Some(command.theme);
        self.user_repo.save(&user).await?;

        tracing::info!(user_id = %command.user_id, "Theme updated");

        Ok(())
    }
}
