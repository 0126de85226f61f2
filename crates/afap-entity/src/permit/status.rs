//! Permit lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an AFAP permit.
///
/// Every permit starts as `Pending`. Approved and rejected are terminal by
/// policy, but the transition table itself lives behind
/// `LifecyclePolicy` in the service layer — this enum stays a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "permit_status")]
pub enum PermitStatus {
    /// Awaiting review.
    #[serde(rename = "pendiente")]
    #[sqlx(rename = "pendiente")]
    Pending,
    /// Scheduled for or undergoing inspection.
    #[serde(rename = "inspeccion")]
    #[sqlx(rename = "inspeccion")]
    Inspection,
    /// Approved; the certificate can be issued.
    #[serde(rename = "aprobado")]
    #[sqlx(rename = "aprobado")]
    Approved,
    /// Rejected.
    #[serde(rename = "rechazado")]
    #[sqlx(rename = "rechazado")]
    Rejected,
}

impl PermitStatus {
    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Inspection => "inspeccion",
            Self::Approved => "aprobado",
            Self::Rejected => "rechazado",
        }
    }
}

impl fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermitStatus {
    type Err = afap_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pendiente" => Ok(Self::Pending),
            "inspeccion" => Ok(Self::Inspection),
            "aprobado" => Ok(Self::Approved),
            "rechazado" => Ok(Self::Rejected),
            _ => Err(afap_core::AppError::validation(format!(
                "Invalid estado: '{s}'. Expected one of: pendiente, inspeccion, aprobado, rechazado"
            ))),
        }
    }
}
