//! AFAP permit entities.

pub mod model;
pub mod public;
pub mod status;

pub use model::{CreatePermit, Permit, StatusChange, TitularTipo, UpdateStatus};
pub use public::PublicPermitView;
pub use status::PermitStatus;
