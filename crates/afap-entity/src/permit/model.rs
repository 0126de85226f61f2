//! AFAP permit entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::PermitStatus;

/// Number of days an AFAP stays valid after issuance.
pub const VALIDITY_DAYS: i64 = 30;

/// Legal nature of the permit holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "titular_tipo")]
pub enum TitularTipo {
    /// Natural person.
    #[serde(rename = "fisica")]
    #[sqlx(rename = "fisica")]
    Fisica,
    /// Legal entity.
    #[serde(rename = "juridica")]
    #[sqlx(rename = "juridica")]
    Juridica,
}

/// A Temporary Automatic Operating Permit (AFAP) record.
///
/// `numero_afap` is the human-facing sequential number; it is assigned
/// exactly once at creation and never reused. The business payload
/// (applicant, holder, premises, category, sanitary facilities) is carried
/// through the lifecycle engine unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permit {
    /// Opaque unique identifier.
    pub id: Uuid,
    /// Sequential permit number, strictly increasing across the registry.
    pub numero_afap: i64,
    /// The citizen who filed the application; immutable.
    pub user_id: Uuid,
    /// Lifecycle state.
    pub estado: PermitStatus,
    /// When the application was filed; immutable.
    pub fecha_solicitud: DateTime<Utc>,
    /// Expiration timestamp, `fecha_solicitud` + 30 days; immutable.
    pub fecha_vencimiento: DateTime<Utc>,
    /// Reviewer annotation, set on status changes.
    pub observaciones: Option<String>,
    /// Optionally assigned inspector.
    pub inspector_asignado: Option<Uuid>,
    /// Optimistic-concurrency version, bumped on every status update.
    pub version: i64,

    // Datos del solicitante
    /// Applicant first name.
    pub solicitante_nombre: String,
    /// Applicant last name.
    pub solicitante_apellido: String,
    /// Applicant CUIT/CUIL.
    pub solicitante_cuit_cuil: String,
    /// Applicant phone.
    pub solicitante_telefono: String,
    /// Applicant email.
    pub solicitante_email: String,

    // Datos del titular
    /// Holder type (natural or legal person).
    pub titular_tipo: TitularTipo,
    /// Holder name.
    pub titular_nombre: Option<String>,
    /// Holder CUIT.
    pub titular_cuit: Option<String>,
    /// Municipal property-tax account.
    pub cuenta_abl: String,

    // Domicilio del comercio
    /// Street name.
    pub domicilio_calle: String,
    /// Street number.
    pub domicilio_altura: String,
    /// Floor.
    pub domicilio_piso: Option<String>,
    /// Apartment.
    pub domicilio_depto: Option<String>,
    /// Shop/unit designation.
    pub domicilio_local: Option<String>,
    /// Locality.
    pub domicilio_localidad: String,

    // Rubro
    /// Business category.
    pub rubro_tipo: String,
    /// Business subcategory.
    pub rubro_subrubro: String,
    /// Free-text activity description.
    pub rubro_descripcion: String,
    /// Premises area in square meters.
    pub metros_cuadrados: f64,

    // Características constructivas
    /// Roof/ceiling materials.
    pub techos_cielorasos: String,
    /// Floor materials.
    pub pisos_material: String,

    // Servicios sanitarios
    /// Whether the premises have sanitary facilities.
    pub tiene_sanitarios: bool,
    /// Direct access to sanitary facilities.
    pub sanitarios_acceso_directo: bool,
    /// Antechamber present.
    pub sanitarios_antecamara: bool,
    /// Men's washbasins.
    pub sanitarios_lavabos_m: i32,
    /// Men's toilets.
    pub sanitarios_retretes_m: i32,
    /// Women's washbasins.
    pub sanitarios_lavabos_f: i32,
    /// Women's toilets.
    pub sanitarios_retretes_f: i32,
    /// Urinals.
    pub sanitarios_migitorios: i32,
    /// Accessible facilities present.
    pub sanitarios_discapacitados: bool,
    /// Worker count.
    pub cantidad_trabajadores: i32,

    // Documentación
    /// Supporting document references.
    pub documentos_urls: Vec<String>,
}

impl Permit {
    /// Whether the permit is past its expiration date at `now`.
    ///
    /// Expiration is never reflected back into `estado`; display layers
    /// compare against the clock themselves.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.fecha_vencimiento
    }

    /// Assembled single-line premises address for documents.
    pub fn domicilio_display(&self) -> String {
        let mut out = format!("{} {}", self.domicilio_calle, self.domicilio_altura);
        if let Some(piso) = &self.domicilio_piso {
            out.push_str(&format!(", Piso {piso}"));
        }
        if let Some(depto) = &self.domicilio_depto {
            out.push_str(&format!(", Depto {depto}"));
        }
        if let Some(local) = &self.domicilio_local {
            out.push_str(&format!(", Local {local}"));
        }
        out
    }
}

/// Application payload submitted by a citizen to open a permit.
///
/// Everything except identity, numbering, ownership, and lifecycle fields,
/// which the registry assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermit {
    /// Applicant first name.
    pub solicitante_nombre: String,
    /// Applicant last name.
    pub solicitante_apellido: String,
    /// Applicant CUIT/CUIL.
    pub solicitante_cuit_cuil: String,
    /// Applicant phone.
    pub solicitante_telefono: String,
    /// Applicant email.
    pub solicitante_email: String,
    /// Holder type.
    pub titular_tipo: TitularTipo,
    /// Holder name.
    #[serde(default)]
    pub titular_nombre: Option<String>,
    /// Holder CUIT.
    #[serde(default)]
    pub titular_cuit: Option<String>,
    /// Municipal property-tax account.
    pub cuenta_abl: String,
    /// Street name.
    pub domicilio_calle: String,
    /// Street number.
    pub domicilio_altura: String,
    /// Floor.
    #[serde(default)]
    pub domicilio_piso: Option<String>,
    /// Apartment.
    #[serde(default)]
    pub domicilio_depto: Option<String>,
    /// Shop/unit designation.
    #[serde(default)]
    pub domicilio_local: Option<String>,
    /// Locality.
    #[serde(default = "default_localidad")]
    pub domicilio_localidad: String,
    /// Business category.
    pub rubro_tipo: String,
    /// Business subcategory.
    pub rubro_subrubro: String,
    /// Free-text activity description.
    pub rubro_descripcion: String,
    /// Premises area in square meters.
    pub metros_cuadrados: f64,
    /// Roof/ceiling materials.
    pub techos_cielorasos: String,
    /// Floor materials.
    pub pisos_material: String,
    /// Whether the premises have sanitary facilities.
    pub tiene_sanitarios: bool,
    /// Direct access to sanitary facilities.
    #[serde(default)]
    pub sanitarios_acceso_directo: bool,
    /// Antechamber present.
    #[serde(default)]
    pub sanitarios_antecamara: bool,
    /// Men's washbasins.
    #[serde(default)]
    pub sanitarios_lavabos_m: i32,
    /// Men's toilets.
    #[serde(default)]
    pub sanitarios_retretes_m: i32,
    /// Women's washbasins.
    #[serde(default)]
    pub sanitarios_lavabos_f: i32,
    /// Women's toilets.
    #[serde(default)]
    pub sanitarios_retretes_f: i32,
    /// Urinals.
    #[serde(default)]
    pub sanitarios_migitorios: i32,
    /// Accessible facilities present.
    #[serde(default)]
    pub sanitarios_discapacitados: bool,
    /// Worker count.
    #[serde(default = "default_trabajadores")]
    pub cantidad_trabajadores: i32,
    /// Supporting document references.
    #[serde(default)]
    pub documentos_urls: Vec<String>,
}

impl CreatePermit {
    /// Materialize a full [`Permit`] owned by `user_id` with the assigned
    /// `numero_afap`, pending state, and a 30-day validity window from `now`.
    pub fn into_permit(self, user_id: Uuid, numero_afap: i64, now: DateTime<Utc>) -> Permit {
        Permit {
            id: Uuid::new_v4(),
            numero_afap,
            user_id,
            estado: PermitStatus::Pending,
            fecha_solicitud: now,
            fecha_vencimiento: now + Duration::days(VALIDITY_DAYS),
            observaciones: None,
            inspector_asignado: None,
            version: 1,
            solicitante_nombre: self.solicitante_nombre,
            solicitante_apellido: self.solicitante_apellido,
            solicitante_cuit_cuil: self.solicitante_cuit_cuil,
            solicitante_telefono: self.solicitante_telefono,
            solicitante_email: self.solicitante_email,
            titular_tipo: self.titular_tipo,
            titular_nombre: self.titular_nombre,
            titular_cuit: self.titular_cuit,
            cuenta_abl: self.cuenta_abl,
            domicilio_calle: self.domicilio_calle,
            domicilio_altura: self.domicilio_altura,
            domicilio_piso: self.domicilio_piso,
            domicilio_depto: self.domicilio_depto,
            domicilio_local: self.domicilio_local,
            domicilio_localidad: self.domicilio_localidad,
            rubro_tipo: self.rubro_tipo,
            rubro_subrubro: self.rubro_subrubro,
            rubro_descripcion: self.rubro_descripcion,
            metros_cuadrados: self.metros_cuadrados,
            techos_cielorasos: self.techos_cielorasos,
            pisos_material: self.pisos_material,
            tiene_sanitarios: self.tiene_sanitarios,
            sanitarios_acceso_directo: self.sanitarios_acceso_directo,
            sanitarios_antecamara: self.sanitarios_antecamara,
            sanitarios_lavabos_m: self.sanitarios_lavabos_m,
            sanitarios_retretes_m: self.sanitarios_retretes_m,
            sanitarios_lavabos_f: self.sanitarios_lavabos_f,
            sanitarios_retretes_f: self.sanitarios_retretes_f,
            sanitarios_migitorios: self.sanitarios_migitorios,
            sanitarios_discapacitados: self.sanitarios_discapacitados,
            cantidad_trabajadores: self.cantidad_trabajadores,
            documentos_urls: self.documentos_urls,
        }
    }
}

/// Status-change request from a reviewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatus {
    /// The new lifecycle state.
    pub estado: PermitStatus,
    /// Optional reviewer annotation.
    #[serde(default)]
    pub observaciones: Option<String>,
    /// The version the caller read. When present, a mismatch against the
    /// stored version rejects the write with a conflict; absent callers
    /// keep last-write-wins semantics.
    #[serde(default)]
    pub version: Option<i64>,
}

/// Result of a committed status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    /// State before the update.
    pub old_estado: PermitStatus,
    /// State after the update.
    pub new_estado: PermitStatus,
    /// The updated permit.
    pub permit: Permit,
}

fn default_localidad() -> String {
    "Argentina".to_string()
}

fn default_trabajadores() -> i32 {
    1
}
