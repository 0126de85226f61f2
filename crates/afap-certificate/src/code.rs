//! Verification code and URL formats shared by the renderer and tests.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Build the printed verification code for a render of permit `numero`.
pub fn verification_code(numero: i64, rendered_at: DateTime<Utc>) -> String {
    format!("VER-{numero}-{}", rendered_at.format("%Y%m%d%H%M"))
}

/// Build the public verification URL a certificate's QR encodes.
pub fn verification_url(base_url: &str, permit_id: Uuid) -> String {
    format!(
        "{}/verificar-certificado/{permit_id}",
        base_url.trim_end_matches('/')
    )
}
