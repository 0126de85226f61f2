//! Capability traits defined in `afap-core` and implemented by other crates.

pub mod notifier;

pub use notifier::{NotificationKind, Notifier};
