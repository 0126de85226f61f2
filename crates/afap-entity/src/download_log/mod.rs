//! Certificate download audit entities.

pub mod model;

pub use model::DownloadLog;
