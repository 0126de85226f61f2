//! Permit registry: creation with sequential numbering, role-scoped
//! visibility, and status updates with side-effect dispatch.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use afap_core::error::AppError;
use afap_core::result::AppResult;
use afap_database::PermitStore;
use afap_entity::permit::{CreatePermit, Permit, StatusChange, UpdateStatus};
use afap_entity::user::UserRole;

use crate::context::RequestContext;

use super::lifecycle::{LifecyclePolicy, NotificationDispatcher};

/// Owns AFAP records: assigns numbers, enforces visibility, and commits
/// lifecycle transitions.
#[derive(Clone)]
pub struct PermitService {
    permits: Arc<dyn PermitStore>,
    policy: Arc<dyn LifecyclePolicy>,
    dispatcher: NotificationDispatcher,
}

impl PermitService {
    /// Creates a new permit service.
    pub fn new(
        permits: Arc<dyn PermitStore>,
        policy: Arc<dyn LifecyclePolicy>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            permits,
            policy,
            dispatcher,
        }
    }

    /// File a new application for the acting citizen.
    ///
    /// The permit number comes from the store's atomic counter, so
    /// concurrent creations always receive distinct consecutive numbers.
    pub async fn create(&self, ctx: &RequestContext, data: CreatePermit) -> AppResult<Permit> {
        let numero = self.permits.next_numero().await?;
        let permit = data.into_permit(ctx.user_id(), numero, Utc::now());
        self.permits.insert(&permit).await?;

        info!(
            afap_id = %permit.id,
            numero_afap = permit.numero_afap,
            user_id = %permit.user_id,
            "Created AFAP application"
        );
        Ok(permit)
    }

    /// Fetch one permit, enforcing citizen ownership.
    pub async fn get(&self, ctx: &RequestContext, id: uuid::Uuid) -> AppResult<Permit> {
        let permit = self
            .permits
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("AFAP no encontrado"))?;

        if ctx.role() == UserRole::Citizen && permit.user_id != ctx.user_id() {
            return Err(AppError::forbidden("No autorizado"));
        }
        Ok(permit)
    }

    /// List permits visible to the actor: citizens see only their own,
    /// inspectors and administrators see all.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Permit>> {
        if ctx.role().sees_all_permits() {
            self.permits.list_all().await
        } else {
            self.permits.list_by_owner(ctx.user_id()).await
        }
    }

    /// Commit a status update and dispatch its notifications.
    ///
    /// The transition itself is authoritative and always commits (policy
    /// permitting); notification delivery is a non-transactional side
    /// channel that never fails the update.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: uuid::Uuid,
        update: UpdateStatus,
    ) -> AppResult<StatusChange> {
        if !ctx.can_review() {
            return Err(AppError::forbidden("No autorizado"));
        }

        let current = self
            .permits
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("AFAP no encontrado"))?;
        let old_estado = current.estado;

        if !self.policy.allows(old_estado, update.estado) {
            return Err(AppError::invalid_state(format!(
                "Transición no permitida: {old_estado} → {}",
                update.estado
            )));
        }

        let permit = self
            .permits
            .update_status(id, update.estado, update.observaciones, update.version)
            .await?;

        info!(
            afap_id = %permit.id,
            numero_afap = permit.numero_afap,
            old = %old_estado,
            new = %permit.estado,
            reviewer = %ctx.user_id(),
            "AFAP status updated"
        );

        self.dispatcher
            .dispatch_status_change(&permit, old_estado, permit.estado)
            .await;

        Ok(StatusChange {
            old_estado,
            new_estado: permit.estado,
            permit,
        })
    }
}
