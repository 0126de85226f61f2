//! Inspection entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{InspectionOutcome, InspectionStatus};

/// A scheduled or performed inspection visit linked to an AFAP.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inspection {
    /// Unique inspection identifier.
    pub id: Uuid,
    /// The permit this inspection belongs to.
    pub afap_id: Uuid,
    /// The inspector assigned to the visit.
    pub inspector_id: Uuid,
    /// Scheduled visit time.
    pub fecha_programada: DateTime<Utc>,
    /// Visit state.
    pub estado: InspectionStatus,
    /// When the visit was actually performed.
    pub fecha_realizada: Option<DateTime<Utc>>,
    /// Outcome recorded on completion.
    pub resultado: Option<InspectionOutcome>,
    /// Inspector's field notes.
    pub notas: Option<String>,
    /// Scheduling annotation.
    pub observaciones: Option<String>,
    /// When the inspection record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to schedule a new inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInspection {
    /// The permit to inspect.
    pub afap_id: Uuid,
    /// The inspector to assign.
    pub inspector_id: Uuid,
    /// Scheduled visit time.
    pub fecha_programada: DateTime<Utc>,
    /// Scheduling annotation.
    #[serde(default)]
    pub observaciones: Option<String>,
}

impl CreateInspection {
    /// Materialize a full [`Inspection`] in the scheduled state.
    pub fn into_inspection(self) -> Inspection {
        Inspection {
            id: Uuid::new_v4(),
            afap_id: self.afap_id,
            inspector_id: self.inspector_id,
            fecha_programada: self.fecha_programada,
            estado: InspectionStatus::Scheduled,
            fecha_realizada: None,
            resultado: None,
            notas: None,
            observaciones: self.observaciones,
            created_at: Utc::now(),
        }
    }
}
