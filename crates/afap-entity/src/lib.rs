//! # afap-entity
//!
//! Domain entity models for the AFAP habilitaciones service: users and
//! roles, AFAP permits with their lifecycle status, inspections, download
//! audit entries, and the certificate data contract.
//!
//! Field names on the wire follow the original municipal data model
//! (`numero_afap`, `solicitante_*`, `domicilio_*`, ...), so entities keep
//! those names; enums use Rust-side variants with renamed wire values.

pub mod certificate;
pub mod download_log;
pub mod inspection;
pub mod permit;
pub mod user;
