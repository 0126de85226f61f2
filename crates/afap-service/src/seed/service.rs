//! Seeds the store with demo users and applications.
//!
//! Idempotent: refuses to run when any user already exists, so a second
//! call cannot duplicate the fixture.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use afap_auth::PasswordHasher;
use afap_core::result::AppResult;
use afap_database::Store;
use afap_entity::permit::{CreatePermit, Permit, PermitStatus};
use afap_entity::user::{CreateUser, User, UserRole};

/// Demo password shared by every seeded account.
const DEMO_PASSWORD: &str = "demo123";

/// Result of a seeding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOutcome {
    /// Whether this call populated the store.
    pub seeded: bool,
    /// Human-readable summary.
    pub message: String,
    /// Users created by this call.
    pub users_created: u64,
    /// Permits created by this call.
    pub afaps_created: u64,
}

/// Populates an empty store with the demo fixture.
#[derive(Clone)]
pub struct SeedService {
    store: Store,
    hasher: PasswordHasher,
}

impl SeedService {
    /// Creates a new seed service.
    pub fn new(store: Store) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
        }
    }

    /// Seed demo users and applications unless data already exists.
    pub async fn seed(&self) -> AppResult<SeedOutcome> {
        let existing = self.store.users.count().await?;
        if existing > 0 {
            return Ok(SeedOutcome {
                seeded: false,
                message: "Database already has data".into(),
                users_created: existing,
                afaps_created: 0,
            });
        }

        let password_hash = self.hasher.hash_password(DEMO_PASSWORD)?;

        let ciudadano = self
            .seed_user(
                "ciudadano@argentina.gob.ar",
                "20123456789",
                "Juan",
                "Pérez",
                "+54 11 1234-5678",
                UserRole::Citizen,
                &password_hash,
            )
            .await?;
        let inspector = self
            .seed_user(
                "inspector@argentina.gob.ar",
                "20987654321",
                "María",
                "González",
                "+54 11 9876-5432",
                UserRole::Inspector,
                &password_hash,
            )
            .await?;
        self.seed_user(
            "admin@argentina.gob.ar",
            "20555555555",
            "Carlos",
            "Rodríguez",
            "+54 11 5555-5555",
            UserRole::Administrator,
            &password_hash,
        )
        .await?;
        let comerciante = self
            .seed_user(
                "comerciante@email.com",
                "20111222333",
                "Ana",
                "Martínez",
                "+54 11 1112-2233",
                UserRole::Citizen,
                &password_hash,
            )
            .await?;

        let mut panaderia = demo_permit(
            &ciudadano,
            1001,
            "Panadería y Confitería",
            "Panadería artesanal",
            "Av. Rivadavia",
            "1234",
            Some("PB"),
            85.5,
            3,
        );
        panaderia.estado = PermitStatus::Approved;
        panaderia.observaciones = Some("Aprobado - Cumple requisitos".into());
        panaderia.inspector_asignado = Some(inspector.id);
        panaderia.fecha_solicitud = Utc::now() - Duration::days(5);
        panaderia.fecha_vencimiento = Utc::now() + Duration::days(25);
        self.store.permits.insert(&panaderia).await?;

        let mut boutique = demo_permit(
            &comerciante,
            1002,
            "Indumentaria",
            "Boutique de ropa",
            "Av. San Martín",
            "500",
            Some("Local 2"),
            120.0,
            2,
        );
        boutique.fecha_solicitud = Utc::now() - Duration::days(2);
        boutique.fecha_vencimiento = Utc::now() + Duration::days(28);
        self.store.permits.insert(&boutique).await?;

        info!("Database seeded with demo fixture");
        Ok(SeedOutcome {
            seeded: true,
            message: "Database seeded successfully".into(),
            users_created: 4,
            afaps_created: 2,
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn seed_user(
        &self,
        email: &str,
        cuit_cuil: &str,
        nombre: &str,
        apellido: &str,
        telefono: &str,
        role: UserRole,
        password_hash: &str,
    ) -> AppResult<User> {
        let user = CreateUser {
            email: email.into(),
            cuit_cuil: cuit_cuil.into(),
            nombre: nombre.into(),
            apellido: apellido.into(),
            telefono: telefono.into(),
            role,
            password_hash: password_hash.into(),
        }
        .into_user();
        self.store.users.insert(&user).await?;
        Ok(user)
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_permit(
    owner: &User,
    numero: i64,
    subrubro: &str,
    descripcion: &str,
    calle: &str,
    altura: &str,
    local: Option<&str>,
    metros: f64,
    trabajadores: i32,
) -> Permit {
    let create = CreatePermit {
        solicitante_nombre: owner.nombre.clone(),
        solicitante_apellido: owner.apellido.clone(),
        solicitante_cuit_cuil: owner.cuit_cuil.clone(),
        solicitante_telefono: owner.telefono.clone(),
        solicitante_email: owner.email.clone(),
        titular_tipo: afap_entity::permit::TitularTipo::Fisica,
        titular_nombre: Some(owner.full_name()),
        titular_cuit: Some(owner.cuit_cuil.clone()),
        cuenta_abl: format!("{numero}5678"),
        domicilio_calle: calle.into(),
        domicilio_altura: altura.into(),
        domicilio_piso: None,
        domicilio_depto: None,
        domicilio_local: local.map(String::from),
        domicilio_localidad: "Morón".into(),
        rubro_tipo: "Comercio Minorista".into(),
        rubro_subrubro: subrubro.into(),
        rubro_descripcion: descripcion.into(),
        metros_cuadrados: metros,
        techos_cielorasos: "Losa con cielorraso aplicado".into(),
        pisos_material: "Cerámico".into(),
        tiene_sanitarios: true,
        sanitarios_acceso_directo: true,
        sanitarios_antecamara: false,
        sanitarios_lavabos_m: 1,
        sanitarios_retretes_m: 1,
        sanitarios_lavabos_f: 1,
        sanitarios_retretes_f: 1,
        sanitarios_migitorios: 0,
        sanitarios_discapacitados: false,
        cantidad_trabajadores: trabajadores,
        documentos_urls: Vec::new(),
    };
    create.into_permit(owner.id, numero, Utc::now())
}
