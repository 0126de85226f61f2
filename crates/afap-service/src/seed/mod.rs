//! Demo data seeding.

pub mod service;

pub use service::{SeedOutcome, SeedService};
