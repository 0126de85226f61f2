//! Download audit store over PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use afap_core::error::{AppError, ErrorKind};
use afap_core::result::AppResult;
use afap_core::types::pagination::{PageRequest, PageResponse};
use afap_entity::download_log::DownloadLog;

use crate::store::DownloadLogStore;

/// PostgreSQL implementation of [`DownloadLogStore`].
#[derive(Debug, Clone)]
pub struct PgDownloadLogStore {
    pool: PgPool,
}

impl PgDownloadLogStore {
    /// Create a new store over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DownloadLogStore for PgDownloadLogStore {
    async fn append(&self, entry: &DownloadLog) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO download_logs (\
                id, afap_id, afap_numero, user_id, user_nombre, user_email, timestamp, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(entry.id)
        .bind(entry.afap_id)
        .bind(entry.afap_numero)
        .bind(entry.user_id)
        .bind(&entry.user_nombre)
        .bind(&entry.user_email)
        .bind(entry.timestamp)
        .bind(&entry.ip_address)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append download log", e)
        })?;
        Ok(())
    }

    async fn list_by_afap(&self, afap_id: Uuid, limit: u32) -> AppResult<Vec<DownloadLog>> {
        sqlx::query_as::<_, DownloadLog>(
            "SELECT * FROM download_logs WHERE afap_id = $1 ORDER BY timestamp DESC LIMIT $2",
        )
        .bind(afap_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list downloads", e))
    }

    async fn list_all(&self, page: &PageRequest) -> AppResult<PageResponse<DownloadLog>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM download_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count downloads", e)
            })?;

        let items = sqlx::query_as::<_, DownloadLog>(
            "SELECT * FROM download_logs ORDER BY timestamp DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list downloads", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
