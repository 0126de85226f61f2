//! Notification configuration.

use serde::{Deserialize, Serialize};

/// Settings for outbound citizen notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Portal URL included in notification bodies so citizens can check
    /// their applications.
    #[serde(default = "default_portal_url")]
    pub portal_url: String,
    /// Display name of the sending office.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            portal_url: default_portal_url(),
            sender_name: default_sender_name(),
        }
    }
}

fn default_portal_url() -> String {
    "http://localhost:3000/mis-solicitudes".to_string()
}

fn default_sender_name() -> String {
    "Dirección de Habilitaciones".to_string()
}
