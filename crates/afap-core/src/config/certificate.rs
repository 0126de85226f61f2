//! Certificate rendering configuration.

use serde::{Deserialize, Serialize};

/// Settings for the certificate renderer and public verification links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateConfig {
    /// Base URL of the public portal; the QR code on every certificate
    /// encodes `{public_base_url}/verificar-certificado/{id}`.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// First header line printed on the certificate.
    #[serde(default = "default_issuer_name")]
    pub issuer_name: String,
    /// Second header line (issuing department).
    #[serde(default = "default_issuer_department")]
    pub issuer_department: String,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            issuer_name: default_issuer_name(),
            issuer_department: default_issuer_department(),
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_issuer_name() -> String {
    "ARGENTINA HABILITACIONES".to_string()
}

fn default_issuer_department() -> String {
    "Dirección de Habilitaciones Comerciales".to_string()
}
