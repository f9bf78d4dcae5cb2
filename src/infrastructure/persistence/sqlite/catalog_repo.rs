//! SQLite Catalog Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{CatalogRepositoryPort, CompletedNovelRecord, RepositoryError};

/// SQLite Catalog Repository - 已完结小说目录存储
pub struct SqliteCatalogRepository {
    pool: DbPool,
}

impl SqliteCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CompletedNovelRow {
    title: String,
    novel_url: String,
    chapter_count: i64,
    image_url: String,
}

impl From<CompletedNovelRow> for CompletedNovelRecord {
    fn from(row: CompletedNovelRow) -> Self {
        Self {
            title: row.title,
            novel_url: row.novel_url,
            chapter_count: row.chapter_count as u32,
            image_url: row.image_url,
        }
    }
}

#[async_trait]
impl CatalogRepositoryPort for SqliteCatalogRepository {
    async fn upsert_all(&self, novels: &[CompletedNovelRecord]) -> Result<usize, RepositoryError> {
        if novels.is_empty() {
            return Ok(0);
        }

        // 整批在一个事务里 upsert，刷新要么整体可见要么不可见
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let now = Utc::now().to_rfc3339();
        for novel in novels {
            sqlx::query(
                r#"
                INSERT INTO completed_novels (novel_url, title, chapter_count, image_url, updated_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(novel_url) DO UPDATE SET
                    title = excluded.title,
                    chapter_count = excluded.chapter_count,
                    image_url = excluded.image_url,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(&novel.novel_url)
            .bind(&novel.title)
            .bind(novel.chapter_count as i64)
            .bind(&novel.image_url)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(novels.len())
    }

    async fn list(&self) -> Result<Vec<CompletedNovelRecord>, RepositoryError> {
        let rows: Vec<CompletedNovelRow> = sqlx::query_as(
            "SELECT title, novel_url, chapter_count, image_url FROM completed_novels ORDER BY chapter_count DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(CompletedNovelRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    fn record(title: &str, chapter_count: u32) -> CompletedNovelRecord {
        CompletedNovelRecord {
            title: title.to_string(),
            novel_url: format!("https://example.com/{}", title),
            chapter_count,
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_upsert_is_keyed_by_novel_url() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = SqliteCatalogRepository::new(pool);

        repo.upsert_all(&[record("a", 600), record("b", 900)])
            .await
            .unwrap();
        // 同一 URL 再次刷新只更新，不产生重复行
        repo.upsert_all(&[record("a", 650)]).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "b");
        assert_eq!(listed[1].chapter_count, 650);
    }
}
