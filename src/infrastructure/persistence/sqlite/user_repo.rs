//! SQLite User Repository
//!
//! 用户文档整行加载、整行写回。novels/history/friends 是 JSON 列，
//! save 原子替换整个文档，并发时 last-writer-wins。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    FriendProfile, RepositoryError, UserRecord, UserRepositoryPort,
};
use crate::domain::library::{HistoryEntry, Library, LibraryEntry};

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    public_id: String,
    date_joined: String,
    profile_image: String,
    theme: Option<String>,
    friends: String,
    novels: String,
    history: String,
}

fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let novels: Vec<LibraryEntry> = serde_json::from_str(&row.novels)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let history: Vec<HistoryEntry> = serde_json::from_str(&row.history)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let friends: Vec<String> = serde_json::from_str(&row.friends)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(UserRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            username: row.username,
            email: row.email,
            public_id: row.public_id,
            date_joined: parse_datetime(&row.date_joined)?,
            profile_image: row.profile_image,
            theme: row.theme,
            friends,
            library: Library::from_parts(novels, history),
        })
    }
}

#[derive(FromRow)]
struct ProfileRow {
    username: String,
    date_joined: String,
    profile_image: String,
}

impl TryFrom<ProfileRow> for FriendProfile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(FriendProfile {
            username: row.username,
            date_joined: parse_datetime(&row.date_joined)?,
            profile_image: row.profile_image,
        })
    }
}

const USER_COLUMNS: &str =
    "id, username, email, public_id, date_joined, profile_image, theme, friends, novels, history";

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_profile_by_public_id(
        &self,
        public_id: &str,
    ) -> Result<Option<FriendProfile>, RepositoryError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            "SELECT username, date_joined, profile_image FROM users WHERE public_id = ?",
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(FriendProfile::try_from).transpose()
    }

    async fn find_friend_profiles(
        &self,
        public_ids: &[String],
    ) -> Result<Vec<FriendProfile>, RepositoryError> {
        if public_ids.is_empty() {
            return Ok(Vec::new());
        }

        // 构建 IN 子句的占位符
        let placeholders: Vec<String> = public_ids.iter().map(|_| "?".to_string()).collect();
        let query = format!(
            "SELECT username, date_joined, profile_image FROM users WHERE public_id IN ({}) ORDER BY username",
            placeholders.join(", ")
        );

        let mut sql_query = sqlx::query_as::<_, ProfileRow>(&query);
        for id in public_ids {
            sql_query = sql_query.bind(id);
        }

        let rows: Vec<ProfileRow> = sql_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(FriendProfile::try_from).collect()
    }

    async fn save(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let novels = serde_json::to_string(user.library.novels())
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let history = serde_json::to_string(user.library.history())
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let friends = serde_json::to_string(&user.friends)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET profile_image = ?, theme = ?, friends = ?, novels = ?, history = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.profile_image)
        .bind(&user.theme)
        .bind(friends)
        .bind(novels)
        .bind(history)
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "User {} not found",
                user.id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::library::NovelDetails;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteIdentityService,
    };
    use crate::application::ports::IdentityPort;
    use crate::config::AuthConfig;

    async fn setup() -> (DbPool, Uuid) {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let identity = SqliteIdentityService::new(pool.clone(), AuthConfig::default());
        let auth = identity
            .register("reader", "reader@example.com", "secret")
            .await
            .unwrap();
        (pool, auth.user_id)
    }

    #[tokio::test]
    async fn test_load_modify_store_round_trip() {
        let (pool, user_id) = setup().await;
        let repo = SqliteUserRepository::new(pool);

        let mut user = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert!(user.library.novels().is_empty());

        user.library.add_novel(
            NovelDetails {
                title: "Example".to_string(),
                author: "A".to_string(),
                cover_url: String::new(),
                description: String::new(),
                number_of_chapters: 10,
                chapters: Vec::new(),
            },
            Utc::now(),
        );
        repo.save(&user).await.unwrap();

        let reloaded = repo.find_by_id(user_id).await.unwrap().unwrap();
        let entry = reloaded.library.find("Example").unwrap();
        assert!(!entry.is_favorite);
        assert_eq!(entry.last_read_chapter, 0);
        assert!(entry.chapters_read.is_empty());
    }

    #[tokio::test]
    async fn test_save_unknown_user_is_not_found() {
        let (pool, _) = setup().await;
        let repo = SqliteUserRepository::new(pool);

        let ghost = UserRecord {
            id: Uuid::new_v4(),
            username: "ghost".to_string(),
            email: "ghost@example.com".to_string(),
            public_id: Uuid::new_v4().to_string(),
            date_joined: Utc::now(),
            profile_image: String::new(),
            theme: None,
            friends: Vec::new(),
            library: Library::new(),
        };

        assert!(matches!(
            repo.save(&ghost).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_profile_lookup_by_public_id() {
        let (pool, user_id) = setup().await;
        let repo = SqliteUserRepository::new(pool);

        let user = repo.find_by_id(user_id).await.unwrap().unwrap();
        let profile = repo
            .find_profile_by_public_id(&user.public_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.username, "reader");

        assert!(repo
            .find_profile_by_public_id("missing")
            .await
            .unwrap()
            .is_none());
    }
}
