//! Integration tests for the permit lifecycle: numbering, visibility,
//! status transitions, notifications, and certificate issuance.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};

use afap_core::traits::NotificationKind;

use crate::helpers::{TestApp, sample_permit_payload};

#[tokio::test]
async fn test_create_assigns_number_state_and_expiry() {
    let app = TestApp::new();
    let token = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;

    let permit = app.create_permit(&token).await;
    assert_eq!(permit["numero_afap"], 1001);
    assert_eq!(permit["estado"], "pendiente");
    assert_eq!(permit["version"], 1);

    let solicitud: DateTime<Utc> = permit["fecha_solicitud"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    let vencimiento: DateTime<Utc> = permit["fecha_vencimiento"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(vencimiento - solicitud, chrono::Duration::days(30));

    let second = app.create_permit(&token).await;
    assert_eq!(second["numero_afap"], 1002);
}

#[tokio::test]
async fn test_listing_is_scoped_by_role() {
    let app = TestApp::new();
    let owner = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let other = app
        .register_user("20111222333", "ana@example.com", "ciudadano")
        .await;
    let inspector = app
        .register_user("20987654321", "insp@example.com", "inspector")
        .await;

    app.create_permit(&owner).await;
    app.create_permit(&other).await;

    let owner_list = app.request("GET", "/api/afap", None, Some(&owner)).await;
    assert_eq!(owner_list.body.as_array().unwrap().len(), 1);

    let inspector_list = app
        .request("GET", "/api/afap", None, Some(&inspector))
        .await;
    assert_eq!(inspector_list.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_foreign_citizen_cannot_read_a_permit() {
    let app = TestApp::new();
    let owner = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let other = app
        .register_user("20111222333", "ana@example.com", "ciudadano")
        .await;

    let permit = app.create_permit(&owner).await;
    let id = permit["id"].as_str().unwrap();

    let response = app
        .request("GET", &format!("/api/afap/{id}"), None, Some(&other))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_citizen_cannot_change_estado() {
    let app = TestApp::new();
    let owner = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let permit = app.create_permit(&owner).await;
    let id = permit["id"].as_str().unwrap();

    let response = app.update_estado(&owner, id, "aprobado", None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_estado_value_is_rejected() {
    let app = TestApp::new();
    let inspector = app
        .register_user("20987654321", "insp@example.com", "inspector")
        .await;
    let owner = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let permit = app.create_permit(&owner).await;
    let id = permit["id"].as_str().unwrap();

    let response = app.update_estado(&inspector, id, "archivado", None).await;
    // Unknown estado values fail deserialization of the request body.
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_stale_version_is_conflict() {
    let app = TestApp::new();
    let inspector = app
        .register_user("20987654321", "insp@example.com", "inspector")
        .await;
    let owner = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let permit = app.create_permit(&owner).await;
    let id = permit["id"].as_str().unwrap();

    let first = app
        .request(
            "PATCH",
            &format!("/api/afap/{id}/estado"),
            Some(serde_json::json!({ "estado": "inspeccion", "version": 1 })),
            Some(&inspector),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["version"], 2);

    let stale = app
        .request(
            "PATCH",
            &format!("/api/afap/{id}/estado"),
            Some(serde_json::json!({ "estado": "aprobado", "version": 1 })),
            Some(&inspector),
        )
        .await;
    assert_eq!(stale.status, StatusCode::CONFLICT);
}

/// The full lifecycle scenario: file → approve → download → verify.
#[tokio::test]
async fn test_full_lifecycle_scenario() {
    let app = TestApp::new();
    let citizen_a = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let citizen_c = app
        .register_user("20111222333", "ana@example.com", "ciudadano")
        .await;
    let inspector = app
        .register_user("20987654321", "insp@example.com", "inspector")
        .await;

    // Citizen A files; the permit opens pending with the next number.
    let permit = app.create_permit(&citizen_a).await;
    let id = permit["id"].as_str().unwrap().to_string();
    assert_eq!(permit["numero_afap"], 1001);
    assert_eq!(permit["estado"], "pendiente");

    // Certificate is unavailable while not approved, for any role.
    let premature = app
        .request(
            "GET",
            &format!("/api/afap/{id}/certificado"),
            None,
            Some(&inspector),
        )
        .await;
    assert_eq!(premature.status, StatusCode::BAD_REQUEST);

    // Inspector B approves; the response reports the transition.
    let approved = app
        .update_estado(&inspector, &id, "aprobado", Some("Cumple requisitos"))
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["old_estado"], "pendiente");
    assert_eq!(approved.body["new_estado"], "aprobado");

    // Exactly one certificate-ready and one status-changed attempt, both
    // to the owner's address.
    let sent = app.notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent.iter()
            .filter(|m| m.kind == NotificationKind::CertificateReady)
            .count(),
        1
    );
    assert_eq!(
        sent.iter()
            .filter(|m| m.kind == NotificationKind::StatusChanged)
            .count(),
        1
    );
    assert!(sent.iter().all(|m| m.to == "juan@example.com"));

    // Citizen A downloads the certificate PDF.
    let download = app
        .request(
            "GET",
            &format!("/api/afap/{id}/certificado"),
            None,
            Some(&citizen_a),
        )
        .await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(
        download.headers.get("content-type").unwrap(),
        "application/pdf"
    );
    assert!(
        download
            .headers
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("HabilitacionPrecaria_1001")
    );
    assert!(download.bytes.starts_with(b"%PDF"));

    // Citizen C is still locked out.
    let foreign = app
        .request(
            "GET",
            &format!("/api/afap/{id}/certificado"),
            None,
            Some(&citizen_c),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);

    // Anonymous verification sees the approved public projection.
    let public = app
        .request("GET", &format!("/api/verificar/{id}"), None, None)
        .await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["estado"], "aprobado");
    assert_eq!(public.body["numero_afap"], 1001);
}

#[tokio::test]
async fn test_download_history_is_admin_only_and_recorded() {
    let app = TestApp::new();
    let owner = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let admin = app
        .register_user("20555555555", "adm@example.com", "administrador")
        .await;

    let permit = app.create_permit(&owner).await;
    let id = permit["id"].as_str().unwrap().to_string();
    app.update_estado(&admin, &id, "aprobado", None).await;

    let download = app
        .request(
            "GET",
            &format!("/api/afap/{id}/certificado"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(download.status, StatusCode::OK);

    let denied = app
        .request(
            "GET",
            &format!("/api/afap/{id}/descargas"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let history = app
        .request(
            "GET",
            &format!("/api/afap/{id}/descargas"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(history.status, StatusCode::OK);
    let entries = history.body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["user_email"], "juan@example.com");
    assert_eq!(entries[0]["afap_numero"], 1001);
}

#[tokio::test]
async fn test_rejection_notifies_without_certificate() {
    let app = TestApp::new();
    let owner = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let inspector = app
        .register_user("20987654321", "insp@example.com", "inspector")
        .await;

    let permit = app.create_permit(&owner).await;
    let id = permit["id"].as_str().unwrap().to_string();
    app.update_estado(&inspector, &id, "rechazado", Some("Documentación incompleta"))
        .await;

    let sent = app.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, NotificationKind::StatusChanged);
    assert_eq!(
        sent[0].payload["observaciones"],
        "Documentación incompleta"
    );
}

#[tokio::test]
async fn test_create_rejects_bad_payload() {
    let app = TestApp::new();
    let token = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;

    let mut payload = sample_permit_payload();
    payload["metros_cuadrados"] = serde_json::json!(-5.0);
    let response = app
        .request("POST", "/api/afap", Some(payload), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
