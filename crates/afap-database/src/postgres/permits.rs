//! Permit store over PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use afap_core::error::{AppError, ErrorKind};
use afap_core::result::AppResult;
use afap_entity::permit::{Permit, PermitStatus};

use crate::store::PermitStore;

/// PostgreSQL implementation of [`PermitStore`].
///
/// Permit numbering is backed by the single-row `afap_counter` table; the
/// increment is one UPDATE … RETURNING statement, so concurrent creators
/// serialize on the row lock and can never observe the same value.
#[derive(Debug, Clone)]
pub struct PgPermitStore {
    pool: PgPool,
}

impl PgPermitStore {
    /// Create a new store over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermitStore for PgPermitStore {
    async fn next_numero(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE afap_counter SET value = value + 1 WHERE name = 'numero_afap' RETURNING value",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to advance permit counter", e)
        })
    }

    async fn insert(&self, permit: &Permit) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO afap (\
                id, numero_afap, user_id, estado, fecha_solicitud, fecha_vencimiento, \
                observaciones, inspector_asignado, version, \
                solicitante_nombre, solicitante_apellido, solicitante_cuit_cuil, \
                solicitante_telefono, solicitante_email, \
                titular_tipo, titular_nombre, titular_cuit, cuenta_abl, \
                domicilio_calle, domicilio_altura, domicilio_piso, domicilio_depto, \
                domicilio_local, domicilio_localidad, \
                rubro_tipo, rubro_subrubro, rubro_descripcion, metros_cuadrados, \
                techos_cielorasos, pisos_material, \
                tiene_sanitarios, sanitarios_acceso_directo, sanitarios_antecamara, \
                sanitarios_lavabos_m, sanitarios_retretes_m, sanitarios_lavabos_f, \
                sanitarios_retretes_f, sanitarios_migitorios, sanitarios_discapacitados, \
                cantidad_trabajadores, documentos_urls) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, \
                $30, $31, $32, $33, $34, $35, $36, $37, $38, $39, $40, $41)",
        )
        .bind(permit.id)
        .bind(permit.numero_afap)
        .bind(permit.user_id)
        .bind(permit.estado)
        .bind(permit.fecha_solicitud)
        .bind(permit.fecha_vencimiento)
        .bind(&permit.observaciones)
        .bind(permit.inspector_asignado)
        .bind(permit.version)
        .bind(&permit.solicitante_nombre)
        .bind(&permit.solicitante_apellido)
        .bind(&permit.solicitante_cuit_cuil)
        .bind(&permit.solicitante_telefono)
        .bind(&permit.solicitante_email)
        .bind(permit.titular_tipo)
        .bind(&permit.titular_nombre)
        .bind(&permit.titular_cuit)
        .bind(&permit.cuenta_abl)
        .bind(&permit.domicilio_calle)
        .bind(&permit.domicilio_altura)
        .bind(&permit.domicilio_piso)
        .bind(&permit.domicilio_depto)
        .bind(&permit.domicilio_local)
        .bind(&permit.domicilio_localidad)
        .bind(&permit.rubro_tipo)
        .bind(&permit.rubro_subrubro)
        .bind(&permit.rubro_descripcion)
        .bind(permit.metros_cuadrados)
        .bind(&permit.techos_cielorasos)
        .bind(&permit.pisos_material)
        .bind(permit.tiene_sanitarios)
        .bind(permit.sanitarios_acceso_directo)
        .bind(permit.sanitarios_antecamara)
        .bind(permit.sanitarios_lavabos_m)
        .bind(permit.sanitarios_retretes_m)
        .bind(permit.sanitarios_lavabos_f)
        .bind(permit.sanitarios_retretes_f)
        .bind(permit.sanitarios_migitorios)
        .bind(permit.sanitarios_discapacitados)
        .bind(permit.cantidad_trabajadores)
        .bind(&permit.documentos_urls)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert permit", e))?;

        // Seeded or imported rows may carry pre-assigned numbers.
        sqlx::query("UPDATE afap_counter SET value = GREATEST(value, $1) WHERE name = 'numero_afap'")
            .bind(permit.numero_afap)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to advance permit counter", e)
            })?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permit>> {
        sqlx::query_as::<_, Permit>("SELECT * FROM afap WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find permit", e))
    }

    async fn list_all(&self) -> AppResult<Vec<Permit>> {
        sqlx::query_as::<_, Permit>("SELECT * FROM afap ORDER BY fecha_solicitud DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list permits", e))
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Permit>> {
        sqlx::query_as::<_, Permit>(
            "SELECT * FROM afap WHERE user_id = $1 ORDER BY fecha_solicitud DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list owner permits", e))
    }

    async fn ids_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM afap WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load ownership index", e)
            })
    }

    async fn update_status(
        &self,
        id: Uuid,
        estado: PermitStatus,
        observaciones: Option<String>,
        expected_version: Option<i64>,
    ) -> AppResult<Permit> {
        let updated = sqlx::query_as::<_, Permit>(
            "UPDATE afap SET estado = $2, observaciones = COALESCE($3, observaciones), \
             version = version + 1 \
             WHERE id = $1 AND ($4::BIGINT IS NULL OR version = $4) RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .bind(&observaciones)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update permit", e))?;

        match updated {
            Some(permit) => Ok(permit),
            None => {
                // Distinguish a missing permit from a stale version.
                if self.find_by_id(id).await?.is_some() {
                    Err(AppError::conflict("Stale version for status update"))
                } else {
                    Err(AppError::not_found("AFAP no encontrado"))
                }
            }
        }
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM afap")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count permits", e)
            })?;
        Ok(count as u64)
    }

    async fn count_by_estado(&self, estado: PermitStatus) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM afap WHERE estado = $1")
            .bind(estado)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count permits by estado", e)
            })?;
        Ok(count as u64)
    }

    async fn recent(&self, limit: u32) -> AppResult<Vec<Permit>> {
        sqlx::query_as::<_, Permit>("SELECT * FROM afap ORDER BY fecha_solicitud DESC LIMIT $1")
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list recent permits", e)
            })
    }
}
