//! Library Command Handlers
//!
//! 每个 handler 执行同一套契约: 加载完整用户文档 → 对单个书架条目
//! 应用一次状态转移 → 整体写回。没有跨小说事务，没有进程内缓存，
//! 同一用户并发请求遵循 last-writer-wins。

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{
    AddNovel, MarkChapterRead, RecordEngagement, SetFavorite, UnmarkChapterRead, UpdateLastRead,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{UserRecord, UserRepositoryPort};
use crate::domain::library::{AddOutcome, ChapterRead, LibraryEntry};

async fn load_user(
    repo: &Arc<dyn UserRepositoryPort>,
    user_id: uuid::Uuid,
) -> Result<UserRecord, ApplicationError> {
    repo.find_by_id(user_id)
        .await?
        .ok_or(ApplicationError::UserNotFound(user_id))
}

// ============================================================================
// AddNovel
// ============================================================================

/// 加入小说响应: 重复标题是正常结果，added=false
#[derive(Debug, Clone)]
pub struct AddNovelResponse {
    pub added: bool,
    pub entry: LibraryEntry,
}

/// AddNovel Handler
pub struct AddNovelHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl AddNovelHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: AddNovel) -> Result<AddNovelResponse, ApplicationError> {
        let mut user = load_user(&self.user_repo, command.user_id).await?;
        let title = command.details.title.clone();

        let (outcome, entry) = user.library.add_novel(command.details, Utc::now());
        let entry = entry.clone();
        let added = outcome == AddOutcome::Added;

        // 幂等 no-op 不需要写回
        if added {
            self.user_repo.save(&user).await?;
            tracing::info!(user_id = %command.user_id, title = %title, "Novel added to library");
        } else {
            tracing::debug!(user_id = %command.user_id, title = %title, "Novel already in library");
        }

        Ok(AddNovelResponse { added, entry })
    }
}

// ============================================================================
// SetFavorite
// ============================================================================

/// SetFavorite Handler
pub struct SetFavoriteHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl SetFavoriteHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: SetFavorite) -> Result<bool, ApplicationError> {
        let mut user = load_user(&self.user_repo, command.user_id).await?;

        user.library.set_favorite(&command.title, command.favorite)?;
        self.user_repo.save(&user).await?;

        tracing::info!(
            user_id = %command.user_id,
            title = %command.title,
            favorite = command.favorite,
            "Favorite flag updated"
        );

        Ok(command.favorite)
    }
}

// ============================================================================
// UpdateLastRead
// ============================================================================

/// UpdateLastRead Handler
pub struct UpdateLastReadHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UpdateLastReadHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: UpdateLastRead) -> Result<(), ApplicationError> {
        let mut user = load_user(&self.user_repo, command.user_id).await?;

        user.library
            .update_last_read(&command.title, command.chapter, Utc::now())?;
        self.user_repo.save(&user).await?;

        tracing::info!(
            user_id = %command.user_id,
            title = %command.title,
            chapter = command.chapter,
            "Last read position updated"
        );

        Ok(())
    }
}

// ============================================================================
// MarkChapterRead
// ============================================================================

/// MarkChapterRead Handler - 按章节号 upsert 已读记录
pub struct MarkChapterReadHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl MarkChapterReadHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: MarkChapterRead) -> Result<ChapterRead, ApplicationError> {
        // progress 是章节内阅读比例
        if let Some(progress) = command.progress {
            if !progress.is_finite() || !(0.0..=1.0).contains(&progress) {
                return Err(ApplicationError::validation(
                    "Progress must be between 0.0 and 1.0",
                ));
            }
        }

        let mut user = load_user(&self.user_repo, command.user_id).await?;
        let read_at = command.read_at.unwrap_or_else(Utc::now);

        let record =
            user.library
                .mark_chapter_read(&command.title, command.chapter, command.progress, read_at)?;
        self.user_repo.save(&user).await?;

        tracing::info!(
            user_id = %command.user_id,
            title = %command.title,
            chapter = command.chapter,
            "Chapter marked as read"
        );

        Ok(record)
    }
}

// ============================================================================
// UnmarkChapterRead
// ============================================================================

/// UnmarkChapterRead Handler
pub struct UnmarkChapterReadHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UnmarkChapterReadHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: UnmarkChapterRead) -> Result<(), ApplicationError> {
        let mut user = load_user(&self.user_repo, command.user_id).await?;

        user.library
            .unmark_chapter_read(&command.title, command.chapter)?;
        self.user_repo.save(&user).await?;

        tracing::info!(
            user_id = %command.user_id,
            title = %command.title,
            chapter = command.chapter,
            "Chapter read removed"
        );

        Ok(())
    }
}

// ============================================================================
// RecordEngagement
// ============================================================================

/// RecordEngagement Handler - 历史 feed 的唯一写入路径
pub struct RecordEngagementHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl RecordEngagementHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: RecordEngagement) -> Result<(), ApplicationError> {
        let mut user = load_user(&self.user_repo, command.user_id).await?;

        user.library.record_engagement(&command.title, Utc::now())?;
        self.user_repo.save(&user).await?;

        tracing::info!(
            user_id = %command.user_id,
            title = %command.title,
            "Engagement recorded"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{FriendProfile, RepositoryError};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::domain::library::{Library, NovelDetails};

    /// 内存版用户仓储，模拟整文档的加载与写回
    #[derive(Default)]
    struct InMemoryUserRepository {
        users: Mutex<HashMap<Uuid, UserRecord>>,
    }

    impl InMemoryUserRepository {
        fn with_user(user: UserRecord) -> Arc<Self> {
            let repo = Self::default();
            repo.users.lock().unwrap().insert(user.id, user);
            Arc::new(repo)
        }
    }

    #[async_trait]
    impl UserRepositoryPort for InMemoryUserRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_profile_by_public_id(
            &self,
            _public_id: &str,
        ) -> Result<Option<FriendProfile>, RepositoryError> {
            Ok(None)
        }

        async fn find_friend_profiles(
            &self,
            _public_ids: &[String],
        ) -> Result<Vec<FriendProfile>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn save(&self, user: &UserRecord) -> Result<(), RepositoryError> {
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(())
        }
    }

    fn test_user() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            public_id: Uuid::new_v4().to_string(),
            date_joined: Utc::now(),
            profile_image: "/images/profile.png".to_string(),
            theme: None,
            friends: Vec::new(),
            library: Library::new(),
        }
    }

    fn details(title: &str) -> NovelDetails {
        NovelDetails {
            title: title.to_string(),
            author: "A".to_string(),
            cover_url: String::new(),
            description: String::new(),
            number_of_chapters: 20,
            chapters: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_add_novel_reports_added_only_once() {
        let user = test_user();
        let user_id = user.id;
        let repo = InMemoryUserRepository::with_user(user);
        let handler = AddNovelHandler::new(repo.clone());

        let first = handler
            .handle(AddNovel {
                user_id,
                details: details("Example"),
            })
            .await
            .unwrap();
        let second = handler
            .handle(AddNovel {
                user_id,
                details: details("Example"),
            })
            .await
            .unwrap();

        assert!(first.added);
        assert!(!second.added);

        let stored = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(stored.library.novels().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_fails_before_library_access() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let handler = SetFavoriteHandler::new(repo);

        let result = handler
            .handle(SetFavorite {
                user_id: Uuid::new_v4(),
                title: "Example".to_string(),
                favorite: true,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_mark_then_unmark_round_trip() {
        let user = test_user();
        let user_id = user.id;
        let repo = InMemoryUserRepository::with_user(user);

        AddNovelHandler::new(repo.clone())
            .handle(AddNovel {
                user_id,
                details: details("Example"),
            })
            .await
            .unwrap();

        let record = MarkChapterReadHandler::new(repo.clone())
            .handle(MarkChapterRead {
                user_id,
                title: "Example".to_string(),
                chapter: 3,
                progress: Some(0.4),
                read_at: None,
            })
            .await
            .unwrap();
        assert_eq!(record.chapter, 3);

        UnmarkChapterReadHandler::new(repo.clone())
            .handle(UnmarkChapterRead {
                user_id,
                title: "Example".to_string(),
                chapter: 3,
            })
            .await
            .unwrap();

        // 再次取消应返回章节级 NotFound 而不是小说级
        let result = UnmarkChapterReadHandler::new(repo.clone())
            .handle(UnmarkChapterRead {
                user_id,
                title: "Example".to_string(),
                chapter: 3,
            })
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::ChapterReadNotFound { chapter: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_progress_outside_unit_range_rejected() {
        let user = test_user();
        let user_id = user.id;
        let repo = InMemoryUserRepository::with_user(user);

        AddNovelHandler::new(repo.clone())
            .handle(AddNovel {
                user_id,
                details: details("Example"),
            })
            .await
            .unwrap();

        let handler = MarkChapterReadHandler::new(repo.clone());
        for bad in [7.3, -0.1, f64::NAN, f64::INFINITY] {
            let result = handler
                .handle(MarkChapterRead {
                    user_id,
                    title: "Example".to_string(),
                    chapter: 1,
                    progress: Some(bad),
                    read_at: None,
                })
                .await;
            assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        }

        // 边界值本身合法
        for ok in [0.0, 1.0] {
            handler
                .handle(MarkChapterRead {
                    user_id,
                    title: "Example".to_string(),
                    chapter: 1,
                    progress: Some(ok),
                    read_at: None,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_engagement_requires_novel_in_library() {
        let user = test_user();
        let user_id = user.id;
        let repo = InMemoryUserRepository::with_user(user);
        let handler = RecordEngagementHandler::new(repo);

        let result = handler
            .handle(RecordEngagement {
                user_id,
                title: "Absent".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::NovelNotFound(_))));
    }

    #[tokio::test]
    async fn test_engagement_persists_snapshot() {
        let user = test_user();
        let user_id = user.id;
        let repo = InMemoryUserRepository::with_user(user);

        AddNovelHandler::new(repo.clone())
            .handle(AddNovel {
                user_id,
                details: details("Example"),
            })
            .await
            .unwrap();
        UpdateLastReadHandler::new(repo.clone())
            .handle(UpdateLastRead {
                user_id,
                title: "Example".to_string(),
                chapter: 3,
            })
            .await
            .unwrap();
        RecordEngagementHandler::new(repo.clone())
            .handle(RecordEngagement {
                user_id,
                title: "Example".to_string(),
            })
            .await
            .unwrap();

        let stored = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(stored.library.history().len(), 1);
        assert_eq!(stored.library.history()[0].last_read_chapter, 3);
    }
}
