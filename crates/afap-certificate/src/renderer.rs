//! The certificate rendering capability.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use afap_core::result::AppResult;
use afap_entity::certificate::CertificateData;

/// Renders a certificate document from the permit snapshot.
///
/// Implementations must embed a scannable code encoding
/// `{base_url}/verificar-certificado/{permit_id}` and must not consult any
/// state beyond the three arguments.
pub trait CertificateRenderer: Send + Sync + 'static {
    /// Produce the document bytes.
    fn render(
        &self,
        data: &CertificateData,
        base_url: &str,
        rendered_at: DateTime<Utc>,
    ) -> AppResult<Bytes>;
}
