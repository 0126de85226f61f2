//! # afap-service
//!
//! Business services for the habilitaciones system: the permit registry
//! with its numbering invariant, the lifecycle state machine and its
//! best-effort notification dispatch, certificate issuance and public
//! verification, inspection scheduling, dashboard statistics, and demo
//! seeding.

pub mod certificate;
pub mod context;
pub mod inspection;
pub mod notify;
pub mod permit;
pub mod seed;
pub mod stats;

pub use context::RequestContext;
