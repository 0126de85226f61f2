//! Download audit entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::permit::Permit;
use crate::user::User;

/// An immutable audit entry recording one certificate download.
///
/// Append-only; entries are never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DownloadLog {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The permit whose certificate was fetched.
    pub afap_id: Uuid,
    /// Permit number at download time.
    pub afap_numero: i64,
    /// Who downloaded.
    pub user_id: Uuid,
    /// Downloader display name.
    pub user_nombre: String,
    /// Downloader email.
    pub user_email: String,
    /// When the download happened.
    pub timestamp: DateTime<Utc>,
    /// Downloader IP address, when known.
    pub ip_address: Option<String>,
}

impl DownloadLog {
    /// Build an entry for `user` fetching `permit`'s certificate now.
    pub fn record(permit: &Permit, user: &User, ip_address: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            afap_id: permit.id,
            afap_numero: permit.numero_afap,
            user_id: user.id,
            user_nombre: user.full_name(),
            user_email: user.email.clone(),
            timestamp: Utc::now(),
            ip_address,
        }
    }
}
