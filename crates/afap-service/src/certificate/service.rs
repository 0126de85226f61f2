//! Certificate issuance and public verification.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use afap_certificate::CertificateRenderer;
use afap_core::config::certificate::CertificateConfig;
use afap_core::error::AppError;
use afap_core::result::AppResult;
use afap_core::types::pagination::{PageRequest, PageResponse};
use afap_database::{DownloadLogStore, PermitStore};
use afap_entity::certificate::CertificateData;
use afap_entity::download_log::DownloadLog;
use afap_entity::permit::{Permit, PermitStatus, PublicPermitView};
use afap_entity::user::UserRole;

use crate::context::RequestContext;

/// Maximum per-permit download-history entries returned.
const HISTORY_LIMIT: u32 = 100;

/// Issues certificates for approved permits and answers public
/// verification queries.
#[derive(Clone)]
pub struct CertificateService {
    permits: Arc<dyn PermitStore>,
    downloads: Arc<dyn DownloadLogStore>,
    renderer: Arc<dyn CertificateRenderer>,
    public_base_url: String,
}

impl CertificateService {
    /// Creates a new certificate service.
    pub fn new(
        permits: Arc<dyn PermitStore>,
        downloads: Arc<dyn DownloadLogStore>,
        renderer: Arc<dyn CertificateRenderer>,
        config: &CertificateConfig,
    ) -> Self {
        Self {
            permits,
            downloads,
            renderer,
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Render the certificate for an approved permit.
    ///
    /// The download is recorded in the audit log best-effort before
    /// rendering; an audit failure never blocks certificate delivery.
    pub async fn issue(&self, ctx: &RequestContext, id: Uuid) -> AppResult<(Permit, Bytes)> {
        let permit = self
            .permits
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("AFAP no encontrado"))?;

        if permit.estado != PermitStatus::Approved {
            return Err(AppError::invalid_state(
                "El AFAP debe estar aprobado para generar el certificado",
            ));
        }

        if ctx.role() == UserRole::Citizen && permit.user_id != ctx.user_id() {
            return Err(AppError::forbidden("No autorizado"));
        }

        let entry = DownloadLog::record(&permit, &ctx.user, ctx.ip_address.clone());
        if let Err(e) = self.downloads.append(&entry).await {
            error!(
                afap_id = %permit.id,
                numero_afap = permit.numero_afap,
                user_id = %ctx.user_id(),
                error = %e,
                "Error logging certificate download"
            );
        } else {
            info!(
                numero_afap = permit.numero_afap,
                by = %ctx.user.email,
                "Certificate downloaded"
            );
        }

        let data = CertificateData::from(&permit);
        let bytes = self
            .renderer
            .render(&data, &self.public_base_url, Utc::now())?;
        Ok((permit, bytes))
    }

    /// Anonymous verification lookup: the reduced public projection.
    pub async fn verify_public(&self, id: Uuid) -> AppResult<PublicPermitView> {
        let permit = self
            .permits
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Certificado no encontrado. Verificá el código QR.")
            })?;
        Ok(PublicPermitView::from(&permit))
    }

    /// Per-permit download history, administrators only.
    pub async fn download_history(
        &self,
        ctx: &RequestContext,
        afap_id: Uuid,
    ) -> AppResult<Vec<DownloadLog>> {
        if !ctx.is_administrator() {
            return Err(AppError::forbidden("No autorizado"));
        }
        self.downloads.list_by_afap(afap_id, HISTORY_LIMIT).await
    }

    /// Global download history, administrators only.
    pub async fn all_downloads(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DownloadLog>> {
        if !ctx.is_administrator() {
            return Err(AppError::forbidden("Solo administradores pueden acceder"));
        }
        self.downloads.list_all(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afap_core::error::ErrorKind;
    use afap_database::Store;
    use afap_entity::permit::CreatePermit;
    use afap_entity::user::{CreateUser, User};
    use chrono::{DateTime, Utc};

    /// Stub renderer returning a fixed marker document.
    struct StubRenderer;

    impl CertificateRenderer for StubRenderer {
        fn render(
            &self,
            data: &CertificateData,
            base_url: &str,
            _rendered_at: DateTime<Utc>,
        ) -> AppResult<Bytes> {
            Ok(Bytes::from(format!(
                "%PDF {} {}",
                data.numero_afap,
                afap_certificate::code::verification_url(base_url, data.permit_id)
            )))
        }
    }

    fn make_user(role: UserRole, cuit: &str, email: &str) -> User {
        CreateUser {
            email: email.into(),
            cuit_cuil: cuit.into(),
            nombre: "Test".into(),
            apellido: "User".into(),
            telefono: "+54 11 0000-0000".into(),
            role,
            password_hash: "hash".into(),
        }
        .into_user()
    }

    fn sample_permit(owner: Uuid, numero: i64, estado: PermitStatus) -> Permit {
        let create: CreatePermit = serde_json::from_value(serde_json::json!({
            "solicitante_nombre": "Juan",
            "solicitante_apellido": "Pérez",
            "solicitante_cuit_cuil": "20123456789",
            "solicitante_telefono": "+54 11 1234-5678",
            "solicitante_email": "juan@example.com",
            "titular_tipo": "fisica",
            "titular_nombre": "Juan Pérez",
            "titular_cuit": "20123456789",
            "cuenta_abl": "12345678",
            "domicilio_calle": "Av. Rivadavia",
            "domicilio_altura": "1234",
            "rubro_tipo": "Comercio Minorista",
            "rubro_subrubro": "Panadería",
            "rubro_descripcion": "Panadería artesanal",
            "metros_cuadrados": 85.5,
            "techos_cielorasos": "Losa",
            "pisos_material": "Cerámico",
            "tiene_sanitarios": true
        }))
        .unwrap();
        let mut permit = create.into_permit(owner, numero, Utc::now());
        permit.estado = estado;
        permit
    }

    fn service(store: &Store) -> CertificateService {
        CertificateService::new(
            store.permits.clone(),
            store.downloads.clone(),
            Arc::new(StubRenderer),
            &CertificateConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_issue_requires_approved_state_for_every_role() {
        let store = Store::in_memory();
        let service = service(&store);

        let owner = make_user(UserRole::Citizen, "201", "owner@example.com");
        store.users.insert(&owner).await.unwrap();
        let permit = sample_permit(owner.id, 1001, PermitStatus::Pending);
        store.permits.insert(&permit).await.unwrap();

        for role in [
            UserRole::Citizen,
            UserRole::Inspector,
            UserRole::Administrator,
        ] {
            let actor = if role == UserRole::Citizen {
                owner.clone()
            } else {
                make_user(role, "999", "actor@example.com")
            };
            let ctx = RequestContext::new(actor, None);
            let err = service.issue(&ctx, permit.id).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidState);
        }
    }

    #[tokio::test]
    async fn test_issue_records_download_and_renders() {
        let store = Store::in_memory();
        let service = service(&store);

        let owner = make_user(UserRole::Citizen, "201", "owner@example.com");
        store.users.insert(&owner).await.unwrap();
        let permit = sample_permit(owner.id, 1001, PermitStatus::Approved);
        store.permits.insert(&permit).await.unwrap();

        let ctx = RequestContext::new(owner.clone(), Some("10.0.0.1".into()));
        let (issued, bytes) = service.issue(&ctx, permit.id).await.unwrap();
        assert_eq!(issued.numero_afap, 1001);
        assert!(bytes.starts_with(b"%PDF"));

        let admin = make_user(UserRole::Administrator, "999", "adm@example.com");
        let admin_ctx = RequestContext::new(admin, None);
        let history = service.download_history(&admin_ctx, permit.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_email, "owner@example.com");
        assert_eq!(history[0].afap_numero, 1001);
        assert_eq!(history[0].ip_address.as_deref(), Some("10.0.0.1"));
    }

    #[tokio::test]
    async fn test_foreign_citizen_is_forbidden() {
        let store = Store::in_memory();
        let service = service(&store);

        let owner = make_user(UserRole::Citizen, "201", "owner@example.com");
        let intruder = make_user(UserRole::Citizen, "202", "other@example.com");
        store.users.insert(&owner).await.unwrap();
        store.users.insert(&intruder).await.unwrap();
        let permit = sample_permit(owner.id, 1001, PermitStatus::Approved);
        store.permits.insert(&permit).await.unwrap();

        let ctx = RequestContext::new(intruder, None);
        let err = service.issue(&ctx, permit.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_verify_public_excludes_applicant_contact_fields() {
        let store = Store::in_memory();
        let service = service(&store);

        let permit = sample_permit(Uuid::new_v4(), 1001, PermitStatus::Approved);
        store.permits.insert(&permit).await.unwrap();

        let view = service.verify_public(permit.id).await.unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("solicitante_email").is_none());
        assert!(json.get("solicitante_telefono").is_none());
        assert!(json.get("solicitante_cuit_cuil").is_none());
        assert_eq!(json["numero_afap"], 1001);
        assert_eq!(json["estado"], "aprobado");
    }

    #[tokio::test]
    async fn test_verify_public_is_idempotent() {
        let store = Store::in_memory();
        let service = service(&store);

        let permit = sample_permit(Uuid::new_v4(), 1001, PermitStatus::Approved);
        store.permits.insert(&permit).await.unwrap();

        let first = serde_json::to_value(service.verify_public(permit.id).await.unwrap()).unwrap();
        let second = serde_json::to_value(service.verify_public(permit.id).await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_verify_public_unknown_id_is_not_found() {
        let store = Store::in_memory();
        let service = service(&store);
        let err = service.verify_public(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_download_history_is_admin_only() {
        let store = Store::in_memory();
        let service = service(&store);

        let inspector = make_user(UserRole::Inspector, "202", "insp@example.com");
        let ctx = RequestContext::new(inspector, None);
        let err = service.download_history(&ctx, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }
}
