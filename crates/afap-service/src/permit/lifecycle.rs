//! Lifecycle transition policy and status-change notification dispatch.

use std::sync::Arc;

use tracing::{error, info};

use afap_core::config::notifier::NotifierConfig;
use afap_core::traits::{NotificationKind, Notifier};
use afap_database::UserStore;
use afap_entity::permit::{Permit, PermitStatus};
use afap_entity::user::User;

/// Decides which status transitions are allowed.
///
/// The registry consults the policy on every update, so a strict
/// transition table can replace the permissive default without touching
/// registry code.
pub trait LifecyclePolicy: Send + Sync + 'static {
    /// Whether moving from `old` to `new` is allowed.
    fn allows(&self, old: PermitStatus, new: PermitStatus) -> bool;
}

/// The current municipal policy: any state may move to any other state,
/// including re-entering `pendiente` after review.
#[derive(Debug, Clone, Default)]
pub struct PermissiveLifecycle;

impl LifecyclePolicy for PermissiveLifecycle {
    fn allows(&self, _old: PermitStatus, _new: PermitStatus) -> bool {
        true
    }
}

/// Dispatches the notifications that follow a committed status update.
///
/// Every dispatch is best-effort: a notifier failure is logged with enough
/// context to replay manually and never propagates to the caller, so a
/// flaky mail path can never block permit processing.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    users: Arc<dyn UserStore>,
    portal_url: String,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        notifier: Arc<dyn Notifier>,
        users: Arc<dyn UserStore>,
        config: &NotifierConfig,
    ) -> Self {
        Self {
            notifier,
            users,
            portal_url: config.portal_url.clone(),
        }
    }

    /// Fire the notifications for a transition of `permit` from `old` to
    /// `new`: a certificate-ready message on first approval, and a
    /// status-changed message on every update.
    pub async fn dispatch_status_change(
        &self,
        permit: &Permit,
        old: PermitStatus,
        new: PermitStatus,
    ) {
        let owner = match self.users.find_by_id(permit.user_id).await {
            Ok(Some(owner)) => owner,
            Ok(None) => {
                error!(
                    afap_id = %permit.id,
                    user_id = %permit.user_id,
                    "Cannot notify status change: owner not found"
                );
                return;
            }
            Err(e) => {
                error!(
                    afap_id = %permit.id,
                    error = %e,
                    "Cannot notify status change: owner lookup failed"
                );
                return;
            }
        };

        if new == PermitStatus::Approved && old != PermitStatus::Approved {
            self.send_certificate_ready(permit, &owner).await;
        }
        self.send_status_changed(permit, &owner, old, new).await;
    }

    async fn send_certificate_ready(&self, permit: &Permit, owner: &User) {
        let payload = serde_json::json!({
            "user_nombre": owner.full_name(),
            "numero_afap": permit.numero_afap,
            "portal_url": self.portal_url,
            "afap": permit,
        });

        match self
            .notifier
            .send(&owner.email, NotificationKind::CertificateReady, &payload)
            .await
        {
            Ok(()) => info!(
                numero_afap = permit.numero_afap,
                to = %owner.email,
                "Certificate email sent"
            ),
            Err(e) => error!(
                numero_afap = permit.numero_afap,
                to = %owner.email,
                error = %e,
                "Error sending certificate email"
            ),
        }
    }

    async fn send_status_changed(
        &self,
        permit: &Permit,
        owner: &User,
        old: PermitStatus,
        new: PermitStatus,
    ) {
        let payload = serde_json::json!({
            "user_nombre": owner.full_name(),
            "numero_afap": permit.numero_afap,
            "old_estado": old,
            "new_estado": new,
            "observaciones": permit.observaciones,
            "portal_url": self.portal_url,
        });

        if let Err(e) = self
            .notifier
            .send(&owner.email, NotificationKind::StatusChanged, &payload)
            .await
        {
            error!(
                numero_afap = permit.numero_afap,
                to = %owner.email,
                error = %e,
                "Error sending status notification"
            );
        }
    }
}
