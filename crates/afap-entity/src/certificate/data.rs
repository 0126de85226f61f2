//! Data contract handed to the certificate renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permit::Permit;

/// Snapshot of the permit fields a certificate embeds.
///
/// The renderer consumes this contract plus a base URL and a render
/// timestamp; everything else on the document (verification code, QR
/// payload, emission footer) is derived from those three inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateData {
    /// Permit identifier, encoded in the verification QR.
    pub permit_id: Uuid,
    /// Sequential permit number.
    pub numero_afap: i64,
    /// Holder name.
    pub titular_nombre: String,
    /// Holder CUIT.
    pub titular_cuit: String,
    /// Assembled premises address line.
    pub domicilio: String,
    /// Locality line.
    pub localidad: String,
    /// Business category.
    pub rubro: String,
    /// Activity description.
    pub actividad: String,
    /// Premises area in square meters.
    pub metros_cuadrados: f64,
    /// Issuance date printed on the document.
    pub fecha_emision: DateTime<Utc>,
    /// Expiration date printed on the document.
    pub fecha_vencimiento: DateTime<Utc>,
}

impl From<&Permit> for CertificateData {
    fn from(permit: &Permit) -> Self {
        Self {
            permit_id: permit.id,
            numero_afap: permit.numero_afap,
            titular_nombre: permit.titular_nombre.clone().unwrap_or_default(),
            titular_cuit: permit.titular_cuit.clone().unwrap_or_default(),
            domicilio: permit.domicilio_display(),
            localidad: permit.domicilio_localidad.clone(),
            rubro: permit.rubro_tipo.clone(),
            actividad: permit.rubro_descripcion.clone(),
            metros_cuadrados: permit.metros_cuadrados,
            fecha_emision: permit.fecha_solicitud,
            fecha_vencimiento: permit.fecha_vencimiento,
        }
    }
}
