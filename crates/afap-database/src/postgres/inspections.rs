//! Inspection store over PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use afap_core::error::{AppError, ErrorKind};
use afap_core::result::AppResult;
use afap_entity::inspection::{Inspection, InspectionStatus};

use crate::store::InspectionStore;

/// PostgreSQL implementation of [`InspectionStore`].
#[derive(Debug, Clone)]
pub struct PgInspectionStore {
    pool: PgPool,
}

impl PgInspectionStore {
    /// Create a new store over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InspectionStore for PgInspectionStore {
    async fn insert(&self, inspection: &Inspection) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO inspecciones (\
                id, afap_id, inspector_id, fecha_programada, estado, fecha_realizada, \
                resultado, notas, observaciones, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(inspection.id)
        .bind(inspection.afap_id)
        .bind(inspection.inspector_id)
        .bind(inspection.fecha_programada)
        .bind(inspection.estado)
        .bind(inspection.fecha_realizada)
        .bind(inspection.resultado)
        .bind(&inspection.notas)
        .bind(&inspection.observaciones)
        .bind(inspection.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert inspection", e)
        })?;
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Inspection>> {
        sqlx::query_as::<_, Inspection>("SELECT * FROM inspecciones ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list inspections", e)
            })
    }

    async fn list_by_inspector(&self, inspector_id: Uuid) -> AppResult<Vec<Inspection>> {
        sqlx::query_as::<_, Inspection>(
            "SELECT * FROM inspecciones WHERE inspector_id = $1 ORDER BY created_at DESC",
        )
        .bind(inspector_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list inspector inspections", e)
        })
    }

    async fn list_by_afap_ids(&self, afap_ids: &[Uuid]) -> AppResult<Vec<Inspection>> {
        sqlx::query_as::<_, Inspection>(
            "SELECT * FROM inspecciones WHERE afap_id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(afap_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list permit inspections", e)
        })
    }

    async fn count_by_estado(&self, estado: InspectionStatus) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inspecciones WHERE estado = $1")
                .bind(estado)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count inspections", e)
                })?;
        Ok(count as u64)
    }
}
