//! Inspection scheduling and role-scoped listing.

use std::sync::Arc;

use tracing::info;

use afap_core::error::AppError;
use afap_core::result::AppResult;
use afap_database::{InspectionStore, PermitStore, UserStore};
use afap_entity::inspection::{CreateInspection, Inspection};
use afap_entity::user::UserRole;

use crate::context::RequestContext;

/// Tracks inspection visits linked to AFAPs.
#[derive(Clone)]
pub struct InspectionService {
    inspections: Arc<dyn InspectionStore>,
    permits: Arc<dyn PermitStore>,
    users: Arc<dyn UserStore>,
}

impl InspectionService {
    /// Creates a new inspection service.
    pub fn new(
        inspections: Arc<dyn InspectionStore>,
        permits: Arc<dyn PermitStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            inspections,
            permits,
            users,
        }
    }

    /// Schedule a visit. Reviewer roles only; the referenced permit must
    /// exist and the assignee must be an inspector.
    pub async fn schedule(
        &self,
        ctx: &RequestContext,
        data: CreateInspection,
    ) -> AppResult<Inspection> {
        if !ctx.can_review() {
            return Err(AppError::forbidden("No autorizado"));
        }

        if self.permits.find_by_id(data.afap_id).await?.is_none() {
            return Err(AppError::not_found("AFAP no encontrado"));
        }

        let assignee = self
            .users
            .find_by_id(data.inspector_id)
            .await?
            .ok_or_else(|| AppError::validation("El inspector asignado no existe"))?;
        if assignee.role != UserRole::Inspector {
            return Err(AppError::validation(
                "El usuario asignado no tiene rol de inspector",
            ));
        }

        let inspection = data.into_inspection();
        self.inspections.insert(&inspection).await?;
        info!(
            inspection_id = %inspection.id,
            afap_id = %inspection.afap_id,
            inspector_id = %inspection.inspector_id,
            "Inspection scheduled"
        );
        Ok(inspection)
    }

    /// List inspections visible to the actor: inspectors see their own
    /// assignments, administrators see all, citizens see the inspections
    /// of permits they own.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Inspection>> {
        match ctx.role() {
            UserRole::Inspector => self.inspections.list_by_inspector(ctx.user_id()).await,
            UserRole::Administrator => self.inspections.list_all().await,
            UserRole::Citizen => {
                let owned = self.permits.ids_by_owner(ctx.user_id()).await?;
                if owned.is_empty() {
                    return Ok(Vec::new());
                }
                self.inspections.list_by_afap_ids(&owned).await
            }
        }
    }
}
