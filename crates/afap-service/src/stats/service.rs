//! Dashboard counters for reviewer roles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use afap_core::error::AppError;
use afap_core::result::AppResult;
use afap_database::{InspectionStore, PermitStore, UserStore};
use afap_entity::inspection::InspectionStatus;
use afap_entity::permit::{Permit, PermitStatus};

use crate::context::RequestContext;

/// Number of recent applications included in the dashboard.
const RECENT_LIMIT: u32 = 5;

/// Permit counters by estado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfapCounts {
    /// All permits.
    pub total: u64,
    /// Pending review.
    pub pendientes: u64,
    /// Approved.
    pub aprobados: u64,
    /// Rejected.
    pub rechazados: u64,
    /// Under inspection.
    pub en_inspeccion: u64,
}

/// Inspection counters by estado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionCounts {
    /// Scheduled visits.
    pub programadas: u64,
    /// Completed visits.
    pub completadas: u64,
}

/// User counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCounts {
    /// Registered users.
    pub total: u64,
}

/// The reviewer dashboard payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Permit counters.
    pub afaps: AfapCounts,
    /// Inspection counters.
    pub inspecciones: InspectionCounts,
    /// User counters.
    pub usuarios: UserCounts,
    /// Most recently filed applications.
    pub recent_afaps: Vec<Permit>,
}

/// Computes dashboard statistics for inspectors and administrators.
#[derive(Clone)]
pub struct StatsService {
    permits: Arc<dyn PermitStore>,
    inspections: Arc<dyn InspectionStore>,
    users: Arc<dyn UserStore>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(
        permits: Arc<dyn PermitStore>,
        inspections: Arc<dyn InspectionStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            permits,
            inspections,
            users,
        }
    }

    /// Compute the dashboard. Reviewer roles only.
    pub async fn dashboard(&self, ctx: &RequestContext) -> AppResult<DashboardStats> {
        if !ctx.can_review() {
            return Err(AppError::forbidden("No autorizado"));
        }

        let afaps = AfapCounts {
            total: self.permits.count().await?,
            pendientes: self.permits.count_by_estado(PermitStatus::Pending).await?,
            aprobados: self.permits.count_by_estado(PermitStatus::Approved).await?,
            rechazados: self.permits.count_by_estado(PermitStatus::Rejected).await?,
            en_inspeccion: self
                .permits
                .count_by_estado(PermitStatus::Inspection)
                .await?,
        };

        let inspecciones = InspectionCounts {
            programadas: self
                .inspections
                .count_by_estado(InspectionStatus::Scheduled)
                .await?,
            completadas: self
                .inspections
                .count_by_estado(InspectionStatus::Completed)
                .await?,
        };

        Ok(DashboardStats {
            afaps,
            inspecciones,
            usuarios: UserCounts {
                total: self.users.count().await?,
            },
            recent_afaps: self.permits.recent(RECENT_LIMIT).await?,
        })
    }
}
