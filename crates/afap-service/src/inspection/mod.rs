//! Inspection scheduling.

pub mod service;

pub use service::InspectionService;
