//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use afap_api::{AppState, build_router};
use afap_certificate::PdfCertificateRenderer;
use afap_core::config::AppConfig;
use afap_database::Store;
use afap_service::notify::RecordingNotifier;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Application state for direct store access.
    pub state: AppState,
    /// Captures every notification attempt.
    pub notifier: Arc<RecordingNotifier>,
}

/// A collected response.
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body bytes.
    pub bytes: Vec<u8>,
    /// Body parsed as JSON (Null when not JSON).
    pub body: Value,
}

impl TestApp {
    /// Create a fresh application over an empty in-memory store.
    pub fn new() -> Self {
        let config = AppConfig::default();
        let notifier = Arc::new(RecordingNotifier::new());
        let renderer = Arc::new(PdfCertificateRenderer::new(&config.certificate));
        let state = AppState::with_collaborators(
            config,
            Store::in_memory(),
            notifier.clone(),
            renderer,
        );
        let router = build_router(state.clone());
        Self {
            router,
            state,
            notifier,
        }
    }

    /// Issue one request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("request build"),
            None => builder.body(Body::empty()).expect("request build"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router call");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collect")
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// Register a user through the API and return their bearer token.
    pub async fn register_user(&self, cuit: &str, email: &str, role: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "cuit_cuil": cuit,
                    "nombre": "Test",
                    "apellido": "User",
                    "telefono": "+54 11 0000-0000",
                    "role": role,
                    "password": "Elefante#Verde99",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "register failed: {}", response.body);
        response.body["access_token"]
            .as_str()
            .expect("access_token in register response")
            .to_string()
    }

    /// File a sample application and return the created permit JSON.
    pub async fn create_permit(&self, token: &str) -> Value {
        let response = self
            .request("POST", "/api/afap", Some(sample_permit_payload()), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::OK, "create failed: {}", response.body);
        response.body
    }

    /// Move a permit into `estado` as a reviewer.
    pub async fn update_estado(
        &self,
        token: &str,
        afap_id: &str,
        estado: &str,
        observaciones: Option<&str>,
    ) -> TestResponse {
        self.request(
            "PATCH",
            &format!("/api/afap/{afap_id}/estado"),
            Some(serde_json::json!({
                "estado": estado,
                "observaciones": observaciones,
            })),
            Some(token),
        )
        .await
    }
}

/// A complete, valid application payload.
pub fn sample_permit_payload() -> Value {
    serde_json::json!({
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
        "domicilio_local": "PB",
        "domicilio_localidad": "Morón",
        "rubro_tipo": "Comercio Minorista",
        "rubro_subrubro": "Panadería y Confitería",
        "rubro_descripcion": "Panadería artesanal",
        "metros_cuadrados": 85.5,
        "techos_cielorasos": "Losa con cielorraso aplicado",
        "pisos_material": "Cerámico",
        "tiene_sanitarios": true,
        "sanitarios_acceso_directo": true,
        "sanitarios_lavabos_m": 1,
        "sanitarios_retretes_m": 1,
        "cantidad_trabajadores": 3
    })
}
