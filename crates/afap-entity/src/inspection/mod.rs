//! Inspection entities.

pub mod model;
pub mod status;

pub use model::{CreateInspection, Inspection};
pub use status::{InspectionOutcome, InspectionStatus};
