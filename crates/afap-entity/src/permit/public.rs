//! Public verification projection of a permit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Permit;
use super::status::PermitStatus;

/// The reduced, public-safe view of a permit returned by the anonymous
/// verification endpoint.
///
/// Deliberately excludes every `solicitante_*` contact field and carries
/// no render-time data, so repeated lookups of an unchanged permit are
/// byte-identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicPermitView {
    /// Permit identifier (the value encoded in the certificate QR).
    pub id: Uuid,
    /// Sequential permit number.
    pub numero_afap: i64,
    /// Lifecycle state.
    pub estado: PermitStatus,
    /// Holder name.
    pub titular_nombre: Option<String>,
    /// Holder CUIT.
    pub titular_cuit: Option<String>,
    /// Street name.
    pub domicilio_calle: String,
    /// Street number.
    pub domicilio_altura: String,
    /// Shop/unit designation.
    pub domicilio_local: Option<String>,
    /// Locality.
    pub domicilio_localidad: String,
    /// Business category.
    pub rubro_tipo: String,
    /// Free-text activity description.
    pub rubro_descripcion: String,
    /// Premises area in square meters.
    pub metros_cuadrados: f64,
    /// When the application was filed.
    pub fecha_solicitud: DateTime<Utc>,
    /// Expiration timestamp.
    pub fecha_vencimiento: DateTime<Utc>,
    /// Reviewer annotation.
    pub observaciones: Option<String>,
}

impl From<&Permit> for PublicPermitView {
    fn from(permit: &Permit) -> Self {
        Self {
            id: permit.id,
            numero_afap: permit.numero_afap,
            estado: permit.estado,
            titular_nombre: permit.titular_nombre.clone(),
            titular_cuit: permit.titular_cuit.clone(),
            domicilio_calle: permit.domicilio_calle.clone(),
            domicilio_altura: permit.domicilio_altura.clone(),
            domicilio_local: permit.domicilio_local.clone(),
            domicilio_localidad: permit.domicilio_localidad.clone(),
            rubro_tipo: permit.rubro_tipo.clone(),
            rubro_descripcion: permit.rubro_descripcion.clone(),
            metros_cuadrados: permit.metros_cuadrados,
            fecha_solicitud: permit.fecha_solicitud,
            fecha_vencimiento: permit.fecha_vencimiento,
            observaciones: permit.observaciones.clone(),
        }
    }
}
