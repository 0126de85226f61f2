//! Inspection status and outcome enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of an inspection visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "inspection_status")]
pub enum InspectionStatus {
    /// Scheduled but not yet performed.
    #[serde(rename = "programada")]
    #[sqlx(rename = "programada")]
    Scheduled,
    /// Visit performed and recorded.
    #[serde(rename = "completada")]
    #[sqlx(rename = "completada")]
    Completed,
    /// Visit cancelled.
    #[serde(rename = "cancelada")]
    #[sqlx(rename = "cancelada")]
    Cancelled,
}

impl InspectionStatus {
    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "programada",
            Self::Completed => "completada",
            Self::Cancelled => "cancelada",
        }
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result recorded when an inspection completes.
///
/// An outcome never propagates into the permit's estado by itself;
/// updating the permit is a separate, explicit reviewer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "inspection_outcome")]
pub enum InspectionOutcome {
    /// Premises approved.
    #[serde(rename = "aprobado")]
    #[sqlx(rename = "aprobado")]
    Approved,
    /// Premises rejected.
    #[serde(rename = "rechazado")]
    #[sqlx(rename = "rechazado")]
    Rejected,
    /// Corrections required before approval.
    #[serde(rename = "requiere_correccion")]
    #[sqlx(rename = "requiere_correccion")]
    RequiresCorrection,
}
