//! Process-local in-memory store backend.
//!
//! Backs demo mode and the test suite. Per-entry mutation goes through
//! `DashMap` shard locks; the permit-number counter is a single atomic,
//! which is what gives concurrent creations distinct, gap-free numbers.

use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use afap_core::error::AppError;
use afap_core::result::AppResult;
use afap_core::types::pagination::{PageRequest, PageResponse};
use afap_entity::download_log::DownloadLog;
use afap_entity::inspection::{Inspection, InspectionStatus};
use afap_entity::permit::{Permit, PermitStatus};
use afap_entity::user::User;

use crate::store::{DownloadLogStore, InspectionStore, PermitStore, UserStore};

/// Permit numbering starts above this base; the first issued number is 1001.
const NUMERO_BASE: i64 = 1000;

/// In-memory implementation of every store trait.
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    permits: DashMap<Uuid, Permit>,
    inspections: DashMap<Uuid, Inspection>,
    downloads: RwLock<Vec<DownloadLog>>,
    numero: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store with the counter at its base value.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            permits: DashMap::new(),
            inspections: DashMap::new(),
            downloads: RwLock::new(Vec::new()),
            numero: AtomicI64::new(NUMERO_BASE),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &User) -> AppResult<()> {
        let duplicate = self.users.iter().any(|entry| {
            entry.value().cuit_cuil == user.cuit_cuil || entry.value().email == user.email
        });
        if duplicate {
            return Err(AppError::conflict("El CUIT/CUIL o email ya está registrado"));
        }
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_cuit(&self, cuit_cuil: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().cuit_cuil == cuit_cuil)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }
}

#[async_trait]
impl PermitStore for MemoryStore {
    async fn next_numero(&self) -> AppResult<i64> {
        Ok(self.numero.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn insert(&self, permit: &Permit) -> AppResult<()> {
        self.numero.fetch_max(permit.numero_afap, Ordering::SeqCst);
        self.permits.insert(permit.id, permit.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permit>> {
        Ok(self.permits.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_all(&self) -> AppResult<Vec<Permit>> {
        let mut permits: Vec<Permit> = self
            .permits
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        permits.sort_by(|a, b| b.fecha_solicitud.cmp(&a.fecha_solicitud));
        Ok(permits)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Permit>> {
        let mut permits: Vec<Permit> = self
            .permits
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        permits.sort_by(|a, b| b.fecha_solicitud.cmp(&a.fecha_solicitud));
        Ok(permits)
    }

    async fn ids_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        Ok(self
            .permits
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| *entry.key())
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        estado: PermitStatus,
        observaciones: Option<String>,
        expected_version: Option<i64>,
    ) -> AppResult<Permit> {
        let mut entry = self
            .permits
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("AFAP no encontrado"))?;

        let permit = entry.value_mut();
        if let Some(expected) = expected_version {
            if permit.version != expected {
                return Err(AppError::conflict(format!(
                    "Stale version {expected}, permit is at {}",
                    permit.version
                )));
            }
        }

        permit.estado = estado;
        if observaciones.is_some() {
            permit.observaciones = observaciones;
        }
        permit.version += 1;
        Ok(permit.clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.permits.len() as u64)
    }

    async fn count_by_estado(&self, estado: PermitStatus) -> AppResult<u64> {
        Ok(self
            .permits
            .iter()
            .filter(|entry| entry.value().estado == estado)
            .count() as u64)
    }

    async fn recent(&self, limit: u32) -> AppResult<Vec<Permit>> {
        let mut permits = PermitStore::list_all(self).await?;
        permits.truncate(limit as usize);
        Ok(permits)
    }
}

#[async_trait]
impl InspectionStore for MemoryStore {
    async fn insert(&self, inspection: &Inspection) -> AppResult<()> {
        self.inspections.insert(inspection.id, inspection.clone());
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Inspection>> {
        let mut inspections: Vec<Inspection> = self
            .inspections
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        inspections.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(inspections)
    }

    async fn list_by_inspector(&self, inspector_id: Uuid) -> AppResult<Vec<Inspection>> {
        let mut inspections: Vec<Inspection> = self
            .inspections
            .iter()
            .filter(|entry| entry.value().inspector_id == inspector_id)
            .map(|entry| entry.value().clone())
            .collect();
        inspections.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(inspections)
    }

    async fn list_by_afap_ids(&self, afap_ids: &[Uuid]) -> AppResult<Vec<Inspection>> {
        let mut inspections: Vec<Inspection> = self
            .inspections
            .iter()
            .filter(|entry| afap_ids.contains(&entry.value().afap_id))
            .map(|entry| entry.value().clone())
            .collect();
        inspections.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(inspections)
    }

    async fn count_by_estado(&self, estado: InspectionStatus) -> AppResult<u64> {
        Ok(self
            .inspections
            .iter()
            .filter(|entry| entry.value().estado == estado)
            .count() as u64)
    }
}

#[async_trait]
impl DownloadLogStore for MemoryStore {
    async fn append(&self, entry: &DownloadLog) -> AppResult<()> {
        self.downloads
            .write()
            .map_err(|_| AppError::internal("Download log lock poisoned"))?
            .push(entry.clone());
        Ok(())
    }

    async fn list_by_afap(&self, afap_id: Uuid, limit: u32) -> AppResult<Vec<DownloadLog>> {
        let logs = self
            .downloads
            .read()
            .map_err(|_| AppError::internal("Download log lock poisoned"))?;
        let mut entries: Vec<DownloadLog> = logs
            .iter()
            .filter(|entry| entry.afap_id == afap_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit as usize);
        Ok(entries)
    }

    async fn list_all(&self, page: &PageRequest) -> AppResult<PageResponse<DownloadLog>> {
        let logs = self
            .downloads
            .read()
            .map_err(|_| AppError::internal("Download log lock poisoned"))?;
        let mut entries: Vec<DownloadLog> = logs.clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let total = entries.len() as u64;
        let items: Vec<DownloadLog> = entries
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_concurrent_numbering_has_no_duplicates_or_gaps() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.next_numero().await }));
        }

        let mut numbers = Vec::new();
        for handle in handles {
            numbers.push(handle.await.unwrap().unwrap());
        }
        numbers.sort_unstable();
        let expected: Vec<i64> = (NUMERO_BASE + 1..=NUMERO_BASE + 50).collect();
        assert_eq!(numbers, expected);
    }

    #[tokio::test]
    async fn test_insert_advances_counter_past_seeded_numbers() {
        let store = MemoryStore::new();
        let permit = sample_permit(1002);
        PermitStore::insert(&store, &permit).await.unwrap();
        assert_eq!(store.next_numero().await.unwrap(), 1003);
    }

    #[tokio::test]
    async fn test_version_conflict() {
        let store = MemoryStore::new();
        let permit = sample_permit(1001);
        let id = permit.id;
        PermitStore::insert(&store, &permit).await.unwrap();

        let updated = store
            .update_status(id, PermitStatus::Inspection, None, Some(1))
            .await
            .unwrap();
        assert_eq!(updated.version, 2);

        let err = store
            .update_status(id, PermitStatus::Approved, None, Some(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind, afap_core::error::ErrorKind::Conflict);
    }

    fn sample_permit(numero: i64) -> Permit {
        use afap_entity::permit::CreatePermit;
        let create: CreatePermit = serde_json::from_value(serde_json::json!({
            "solicitante_nombre": "Juan",
            "solicitante_apellido": "Pérez",
            "solicitante_cuit_cuil": "20123456789",
            "solicitante_telefono": "+54 11 1234-5678",
            "solicitante_email": "juan@example.com",
            "titular_tipo": "fisica",
            "cuenta_abl": "12345678",
            "domicilio_calle": "Av. Rivadavia",
            "domicilio_altura": "1234",
            "rubro_tipo": "Comercio Minorista",
            "rubro_subrubro": "Panadería",
            "rubro_descripcion": "Panadería artesanal",
            "metros_cuadrados": 85.5,
            "techos_cielorasos": "Losa",
            "pisos_material": "Cerámico",
            "tiene_sanitarios": true
        }))
        .unwrap();
        create.into_permit(Uuid::new_v4(), numero, chrono::Utc::now())
    }
}
