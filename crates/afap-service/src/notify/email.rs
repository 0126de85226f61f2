//! Log-simulated email notifier.
//!
//! Renders the notification bodies and writes them to the structured log
//! instead of handing them to a mail provider; production deployments
//! swap in a real delivery integration behind the same [`Notifier`] trait.

use async_trait::async_trait;
use tracing::info;

use afap_core::result::AppResult;
use afap_core::traits::{NotificationKind, Notifier};

/// Simulated email delivery via the application log.
#[derive(Debug, Clone, Default)]
pub struct EmailNotifier;

impl EmailNotifier {
    /// Creates a new notifier.
    pub fn new() -> Self {
        Self
    }

    fn subject(kind: NotificationKind, payload: &serde_json::Value) -> String {
        let numero = payload
            .get("numero_afap")
            .and_then(|v| v.as_i64())
            .unwrap_or_default();
        match kind {
            NotificationKind::CertificateReady => {
                format!("AFAP #{numero} - Certificado Aprobado")
            }
            NotificationKind::StatusChanged => {
                format!("AFAP #{numero} - Cambio de estado")
            }
        }
    }

    fn body(kind: NotificationKind, payload: &serde_json::Value) -> String {
        let nombre = payload
            .get("user_nombre")
            .and_then(|v| v.as_str())
            .unwrap_or("vecino/a");
        let numero = payload
            .get("numero_afap")
            .and_then(|v| v.as_i64())
            .unwrap_or_default();
        let portal = payload
            .get("portal_url")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        match kind {
            NotificationKind::CertificateReady => format!(
                "Estimado/a {nombre},\n\n\
                 ¡Felicitaciones! Tu solicitud AFAP #{numero} ha sido APROBADA.\n\n\
                 Podés descargar tu certificado ingresando a: {portal}\n\n\
                 El certificado debe ser exhibido en lugar visible del establecimiento.\n\
                 Esta autorización es PRECARIA y tiene validez de 30 días."
            ),
            NotificationKind::StatusChanged => {
                let new_estado = payload
                    .get("new_estado")
                    .and_then(|v| v.as_str())
                    .unwrap_or("actualizado");
                let observaciones = payload
                    .get("observaciones")
                    .and_then(|v| v.as_str())
                    .map(|obs| format!("\nObservaciones: {obs}\n"))
                    .unwrap_or_default();
                format!(
                    "Estimado/a {nombre},\n\n\
                     Tu solicitud AFAP #{numero} cambió a estado: {new_estado}.\n\
                     {observaciones}\n\
                     Podés ver el estado actualizado ingresando a: {portal}"
                )
            }
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(
        &self,
        to: &str,
        kind: NotificationKind,
        payload: &serde_json::Value,
    ) -> AppResult<()> {
        info!(
            to = %to,
            template = kind.as_str(),
            subject = %Self::subject(kind, payload),
            body = %Self::body(kind, payload),
            "Email enviado (simulado)"
        );
        Ok(())
    }
}
