//! Dashboard statistics.

pub mod service;

pub use service::{DashboardStats, StatsService};
