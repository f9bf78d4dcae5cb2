//! SQLite Identity Service
//!
//! IdentityPort 的存储实现：盐化摘要的凭证列、不透明会话令牌表、
//! 短期密码重置码。核心只见到"已解析的用户 ID"。

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{AuthToken, IdentityError, IdentityPort, ResetCode};
use crate::config::AuthConfig;

/// SQLite Identity Service
pub struct SqliteIdentityService {
    pool: DbPool,
    config: AuthConfig,
}

impl SqliteIdentityService {
    pub fn new(pool: DbPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    fn digest(salt: &str, password: &str) -> String {
        format!("{:x}", md5::compute(format!("{}{}", salt, password)))
    }

    /// 6 位数字重置码，取 uuid 随机字节求余
    fn generate_reset_code() -> String {
        let bytes = Uuid::new_v4().into_bytes();
        let seed = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        format!("{:06}", 100_000 + seed % 900_000)
    }

    async fn issue_token(&self, user_id: Uuid) -> Result<AuthToken, IdentityError> {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::days(self.config.token_ttl_days);

        sqlx::query("INSERT INTO tokens (token, user_id, expires_at) VALUES (?, ?, ?)")
            .bind(&token)
            .bind(user_id.to_string())
            .bind(expires_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| IdentityError::Storage(e.to_string()))?;

        Ok(AuthToken {
            token,
            user_id,
            expires_at,
        })
    }

    async fn username_exists(&self, username: &str) -> Result<bool, IdentityError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IdentityError::Storage(e.to_string()))?;
        Ok(row.is_some())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, IdentityError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IdentityError::Storage(e.to_string()))?;
        Ok(row.is_some())
    }

    /// 重置码必须与存储值一致且未过期
    async fn reset_code_valid(&self, email: &str, code: &str) -> Result<bool, IdentityError> {
        let row: Option<ResetCodeRow> =
            sqlx::query_as("SELECT reset_code, reset_code_expires FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| IdentityError::Storage(e.to_string()))?;

        let row = match row {
            Some(row) => row,
            None => return Ok(false),
        };

        let (stored, expires) = match (row.reset_code, row.reset_code_expires) {
            (Some(stored), Some(expires)) => (stored, expires),
            _ => return Ok(false),
        };

        if stored != code {
            return Ok(false);
        }

        let expires_at = DateTime::parse_from_rfc3339(&expires)
            .map_err(|e| IdentityError::Storage(e.to_string()))?
            .with_timezone(&Utc);

        Ok(Utc::now() < expires_at)
    }
}

#[derive(FromRow)]
struct CredentialRow {
    id: String,
    password_digest: String,
    password_salt: String,
}

#[derive(FromRow)]
struct TokenRow {
    user_id: String,
    expires_at: String,
}

#[derive(FromRow)]
struct ResetCodeRow {
    reset_code: Option<String>,
    reset_code_expires: Option<String>,
}

#[async_trait]
impl IdentityPort for SqliteIdentityService {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthToken, IdentityError> {
        if self.username_exists(username).await? {
            return Err(IdentityError::UsernameTaken);
        }
        if self.email_exists(email).await? {
            return Err(IdentityError::EmailTaken);
        }

        let user_id = Uuid::new_v4();
        let public_id = Uuid::new_v4().to_string();
        let salt = Uuid::new_v4().to_string();
        let digest = Self::digest(&salt, password);

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_digest, password_salt, public_id, date_joined)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id.to_string())
        .bind(username)
        .bind(email)
        .bind(digest)
        .bind(salt)
        .bind(public_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| IdentityError::Storage(e.to_string()))?;

        self.issue_token(user_id).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthToken, IdentityError> {
        let row: Option<CredentialRow> =
            sqlx::query_as("SELECT id, password_digest, password_salt FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| IdentityError::Storage(e.to_string()))?;

        let row = row.ok_or(IdentityError::InvalidCredentials)?;
        if Self::digest(&row.password_salt, password) != row.password_digest {
            return Err(IdentityError::InvalidCredentials);
        }

        let user_id =
            Uuid::parse_str(&row.id).map_err(|e| IdentityError::Storage(e.to_string()))?;
        self.issue_token(user_id).await
    }

    async fn verify_token(&self, token: &str) -> Result<Option<Uuid>, IdentityError> {
        let row: Option<TokenRow> =
            sqlx::query_as("SELECT user_id, expires_at FROM tokens WHERE token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| IdentityError::Storage(e.to_string()))?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let expires_at = DateTime::parse_from_rfc3339(&row.expires_at)
            .map_err(|e| IdentityError::Storage(e.to_string()))?
            .with_timezone(&Utc);

        if expires_at <= Utc::now() {
            // 过期令牌顺手清掉
            sqlx::query("DELETE FROM tokens WHERE token = ?")
                .bind(token)
                .execute(&self.pool)
                .await
                .map_err(|e| IdentityError::Storage(e.to_string()))?;
            return Ok(None);
        }

        let user_id =
            Uuid::parse_str(&row.user_id).map_err(|e| IdentityError::Storage(e.to_string()))?;
        Ok(Some(user_id))
    }

    async fn issue_reset_code(&self, email: &str) -> Result<Option<ResetCode>, IdentityError> {
        if !self.email_exists(email).await? {
            return Ok(None);
        }

        let code = Self::generate_reset_code();
        let expires_at = Utc::now() + Duration::seconds(self.config.reset_code_ttl_secs);

        sqlx::query("UPDATE users SET reset_code = ?, reset_code_expires = ? WHERE email = ?")
            .bind(&code)
            .bind(expires_at.to_rfc3339())
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| IdentityError::Storage(e.to_string()))?;

        Ok(Some(ResetCode { code, expires_at }))
    }

    async fn verify_reset_code(&self, email: &str, code: &str) -> Result<bool, IdentityError> {
        self.reset_code_valid(email, code).await
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        if !self.reset_code_valid(email, code).await? {
            return Err(IdentityError::InvalidResetCode);
        }

        let salt = Uuid::new_v4().to_string();
        let digest = Self::digest(&salt, new_password);

        // 新盐新摘要，重置码一次性使用
        sqlx::query(
            r#"
            UPDATE users
            SET password_digest = ?, password_salt = ?,
                reset_code = NULL, reset_code_expires = NULL
            WHERE email = ?
            "#,
        )
        .bind(digest)
        .bind(salt)
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| IdentityError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn service() -> SqliteIdentityService {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteIdentityService::new(pool, AuthConfig::default())
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let identity = service().await;

        let registered = identity
            .register("reader", "reader@example.com", "secret")
            .await
            .unwrap();
        let logged_in = identity.login("reader", "secret").await.unwrap();

        assert_eq!(registered.user_id, logged_in.user_id);
        assert_ne!(registered.token, logged_in.token);
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email_rejected() {
        let identity = service().await;
        identity
            .register("reader", "reader@example.com", "secret")
            .await
            .unwrap();

        assert!(matches!(
            identity.register("reader", "other@example.com", "x").await,
            Err(IdentityError::UsernameTaken)
        ));
        assert!(matches!(
            identity.register("other", "reader@example.com", "x").await,
            Err(IdentityError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let identity = service().await;
        identity
            .register("reader", "reader@example.com", "secret")
            .await
            .unwrap();

        assert!(matches!(
            identity.login("reader", "wrong").await,
            Err(IdentityError::InvalidCredentials)
        ));
        assert!(matches!(
            identity.login("nobody", "secret").await,
            Err(IdentityError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_verify_token() {
        let identity = service().await;
        let auth = identity
            .register("reader", "reader@example.com", "secret")
            .await
            .unwrap();

        let verified = identity.verify_token(&auth.token).await.unwrap();
        assert_eq!(verified, Some(auth.user_id));

        let missing = identity.verify_token("not-a-token").await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_reset_code_only_for_known_email() {
        let identity = service().await;
        identity
            .register("reader", "reader@example.com", "secret")
            .await
            .unwrap();

        let code = identity
            .issue_reset_code("reader@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(code.code.len(), 6);

        assert!(identity
            .issue_reset_code("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_reset_password_with_valid_code() {
        let identity = service().await;
        identity
            .register("reader", "reader@example.com", "secret")
            .await
            .unwrap();

        let issued = identity
            .issue_reset_code("reader@example.com")
            .await
            .unwrap()
            .unwrap();

        assert!(identity
            .verify_reset_code("reader@example.com", &issued.code)
            .await
            .unwrap());
        assert!(!identity
            .verify_reset_code("reader@example.com", "000000")
            .await
            .unwrap());

        identity
            .reset_password("reader@example.com", &issued.code, "new-secret")
            .await
            .unwrap();

        assert!(matches!(
            identity.login("reader", "secret").await,
            Err(IdentityError::InvalidCredentials)
        ));
        identity.login("reader", "new-secret").await.unwrap();

        // 码已消费，不能重放
        assert!(!identity
            .verify_reset_code("reader@example.com", &issued.code)
            .await
            .unwrap());
        assert!(matches!(
            identity
                .reset_password("reader@example.com", &issued.code, "again")
                .await,
            Err(IdentityError::InvalidResetCode)
        ));
    }

    #[tokio::test]
    async fn test_expired_reset_code_rejected() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        // TTL 为负，签发即过期
        let config = AuthConfig {
            reset_code_ttl_secs: -1,
            ..AuthConfig::default()
        };
        let identity = SqliteIdentityService::new(pool, config);

        identity
            .register("reader", "reader@example.com", "secret")
            .await
            .unwrap();
        let issued = identity
            .issue_reset_code("reader@example.com")
            .await
            .unwrap()
            .unwrap();

        assert!(!identity
            .verify_reset_code("reader@example.com", &issued.code)
            .await
            .unwrap());
        assert!(matches!(
            identity
                .reset_password("reader@example.com", &issued.code, "new-secret")
                .await,
            Err(IdentityError::InvalidResetCode)
        ));
    }
}
