//! The outbound notification capability.
//!
//! Permit processing never depends on a notification succeeding: callers
//! invoke [`Notifier::send`] best-effort, log failures with enough context
//! to replay manually, and continue.

use async_trait::async_trait;

use crate::result::AppResult;

/// Template kinds for citizen notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// The permit was approved and its certificate can be downloaded.
    CertificateReady,
    /// The permit status changed (any transition).
    StatusChanged,
}

impl NotificationKind {
    /// Return the kind as its wire/template key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CertificateReady => "certificate-ready",
            Self::StatusChanged => "status-changed",
        }
    }
}

/// Sends a templated notification to a recipient address.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Deliver one notification. The payload carries the template fields
    /// (permit number, states, observations, ...) as JSON.
    async fn send(
        &self,
        to: &str,
        kind: NotificationKind,
        payload: &serde_json::Value,
    ) -> AppResult<()>;
}
