//! Request context carrying the authenticated actor.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use afap_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built by the API layer after bearer resolution and passed into service
/// methods so every operation knows *who* is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The resolved actor.
    pub user: User,
    /// IP address of the request origin, when known.
    pub ip_address: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: User, ip_address: Option<String>) -> Self {
        Self {
            user,
            ip_address,
            request_time: Utc::now(),
        }
    }

    /// The acting user's id.
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// The acting user's role.
    pub fn role(&self) -> UserRole {
        self.user.role
    }

    /// Whether the actor may review applications.
    pub fn can_review(&self) -> bool {
        self.user.role.can_review()
    }

    /// Whether the actor is an administrator.
    pub fn is_administrator(&self) -> bool {
        self.user.role.is_administrator()
    }
}
