//! Certificate issuance, public verification, and download audit.

pub mod service;

pub use service::CertificateService;
