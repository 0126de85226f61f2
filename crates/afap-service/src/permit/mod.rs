//! Permit registry and lifecycle.

pub mod lifecycle;
pub mod service;

pub use lifecycle::{LifecyclePolicy, NotificationDispatcher, PermissiveLifecycle};
pub use service::PermitService;
