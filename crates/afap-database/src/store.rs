//! Backend-neutral store traits and the aggregate [`Store`] handle.
//!
//! Services depend only on these traits; the concrete backend (PostgreSQL
//! or in-memory) is selected from configuration at startup.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use afap_core::config::database::{DatabaseConfig, StoreBackend};
use afap_core::result::AppResult;
use afap_core::types::pagination::{PageRequest, PageResponse};
use afap_entity::download_log::DownloadLog;
use afap_entity::inspection::{Inspection, InspectionStatus};
use afap_entity::permit::{Permit, PermitStatus};
use afap_entity::user::User;

use crate::memory::MemoryStore;
use crate::postgres::PostgresStore;

/// User lookup and registration.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new user. Duplicate cuit_cuil or email yields `Conflict`.
    async fn insert(&self, user: &User) -> AppResult<()>;

    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by CUIT/CUIL.
    async fn find_by_cuit(&self, cuit_cuil: &str) -> AppResult<Option<User>>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Count registered users.
    async fn count(&self) -> AppResult<u64>;
}

/// Permit persistence, numbering, and scoped listing.
#[async_trait]
pub trait PermitStore: Send + Sync + 'static {
    /// Atomically fetch the next permit number.
    ///
    /// This is the single cross-record serialization point in the system:
    /// concurrent callers must never observe the same value.
    async fn next_numero(&self) -> AppResult<i64>;

    /// Insert a new permit. Also advances the number counter to at least
    /// the permit's `numero_afap` so externally numbered rows (seed data,
    /// imports) can never cause a reissue.
    async fn insert(&self, permit: &Permit) -> AppResult<()>;

    /// Find a permit by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permit>>;

    /// List every permit, newest first.
    async fn list_all(&self) -> AppResult<Vec<Permit>>;

    /// List permits owned by `user_id`, newest first.
    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Permit>>;

    /// The ownership index: ids of permits owned by `user_id`.
    async fn ids_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Atomically update a permit's estado (and observaciones when given),
    /// bumping its version.
    ///
    /// `expected_version` of `Some(v)` rejects the write with `Conflict`
    /// when the stored version differs; `None` is last-write-wins.
    /// Returns the updated permit, or `NotFound`.
    async fn update_status(
        &self,
        id: Uuid,
        estado: PermitStatus,
        observaciones: Option<String>,
        expected_version: Option<i64>,
    ) -> AppResult<Permit>;

    /// Count all permits.
    async fn count(&self) -> AppResult<u64>;

    /// Count permits in a given estado.
    async fn count_by_estado(&self, estado: PermitStatus) -> AppResult<u64>;

    /// The most recently filed permits.
    async fn recent(&self, limit: u32) -> AppResult<Vec<Permit>>;
}

/// Inspection persistence and scoped listing.
#[async_trait]
pub trait InspectionStore: Send + Sync + 'static {
    /// Insert a new inspection.
    async fn insert(&self, inspection: &Inspection) -> AppResult<()>;

    /// List every inspection, newest first.
    async fn list_all(&self) -> AppResult<Vec<Inspection>>;

    /// List inspections assigned to `inspector_id`, newest first.
    async fn list_by_inspector(&self, inspector_id: Uuid) -> AppResult<Vec<Inspection>>;

    /// List inspections whose `afap_id` is among `afap_ids`, newest first.
    async fn list_by_afap_ids(&self, afap_ids: &[Uuid]) -> AppResult<Vec<Inspection>>;

    /// Count inspections in a given estado.
    async fn count_by_estado(&self, estado: InspectionStatus) -> AppResult<u64>;
}

/// Append-only download audit log.
#[async_trait]
pub trait DownloadLogStore: Send + Sync + 'static {
    /// Append one entry.
    async fn append(&self, entry: &DownloadLog) -> AppResult<()>;

    /// Entries for one permit, newest first, capped at `limit`.
    async fn list_by_afap(&self, afap_id: Uuid, limit: u32) -> AppResult<Vec<DownloadLog>>;

    /// All entries, newest first, paginated.
    async fn list_all(&self, page: &PageRequest) -> AppResult<PageResponse<DownloadLog>>;
}

/// Aggregate handle bundling every store trait behind `Arc`s.
///
/// Cheap to clone; handed to services and the API state.
#[derive(Clone)]
pub struct Store {
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Permit store.
    pub permits: Arc<dyn PermitStore>,
    /// Inspection store.
    pub inspections: Arc<dyn InspectionStore>,
    /// Download audit store.
    pub downloads: Arc<dyn DownloadLogStore>,
    backend: StoreBackend,
    pg: Option<PostgresStore>,
}

impl Store {
    /// Connect the backend selected in `config`, running migrations for
    /// PostgreSQL.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            StoreBackend::Postgres => {
                let pg = PostgresStore::connect(config).await?;
                pg.run_migrations().await?;
                Ok(Self::from_postgres(pg))
            }
            StoreBackend::Memory => Ok(Self::in_memory()),
        }
    }

    /// Build a store over an already-connected PostgreSQL backend.
    pub fn from_postgres(pg: PostgresStore) -> Self {
        Self {
            users: Arc::new(pg.users()),
            permits: Arc::new(pg.permits()),
            inspections: Arc::new(pg.inspections()),
            downloads: Arc::new(pg.downloads()),
            backend: StoreBackend::Postgres,
            pg: Some(pg),
        }
    }

    /// Build a fresh in-memory store.
    pub fn in_memory() -> Self {
        let mem = Arc::new(MemoryStore::new());
        Self {
            users: mem.clone(),
            permits: mem.clone(),
            inspections: mem.clone(),
            downloads: mem,
            backend: StoreBackend::Memory,
            pg: None,
        }
    }

    /// Which backend this store runs on.
    pub fn backend(&self) -> StoreBackend {
        self.backend
    }

    /// Check store connectivity for health reporting.
    pub async fn ping(&self) -> AppResult<()> {
        match &self.pg {
            Some(pg) => pg.ping().await,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
