//! Integration tests for health, seeding, statistics, and the global
//! download audit.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_store_status() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["database"], "healthy");

    let api_alias = app.request("GET", "/api/health", None, None).await;
    assert_eq!(api_alias.status, StatusCode::OK);
}

#[tokio::test]
async fn test_seed_populates_once() {
    let app = TestApp::new();

    let first = app.request("POST", "/api/seed", None, None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["seeded"], true);
    assert_eq!(first.body["users_created"], 4);
    assert_eq!(first.body["afaps_created"], 2);

    let second = app.request("POST", "/api/seed", None, None).await;
    assert_eq!(second.body["seeded"], false);

    // The seeded demo inspector can log in with the demo password.
    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "cuit_cuil": "20987654321",
                "password": "demo123",
            })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["role"], "inspector");

    // Fresh applications continue after the seeded numbers.
    let citizen = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "cuit_cuil": "20123456789",
                "password": "demo123",
            })),
            None,
        )
        .await;
    let token = citizen.body["access_token"].as_str().unwrap().to_string();
    let permit = app.create_permit(&token).await;
    assert_eq!(permit["numero_afap"], 1003);
}

#[tokio::test]
async fn test_dashboard_is_reviewer_only() {
    let app = TestApp::new();
    let citizen = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let denied = app
        .request("GET", "/api/stats/dashboard", None, Some(&citizen))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_counts_after_seed() {
    let app = TestApp::new();
    app.request("POST", "/api/seed", None, None).await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "cuit_cuil": "20555555555",
                "password": "demo123",
            })),
            None,
        )
        .await;
    let admin = login.body["access_token"].as_str().unwrap().to_string();

    let stats = app
        .request("GET", "/api/stats/dashboard", None, Some(&admin))
        .await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["afaps"]["total"], 2);
    assert_eq!(stats.body["afaps"]["aprobados"], 1);
    assert_eq!(stats.body["afaps"]["pendientes"], 1);
    assert_eq!(stats.body["usuarios"]["total"], 4);
    assert_eq!(stats.body["recent_afaps"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_global_download_audit_is_admin_only() {
    let app = TestApp::new();
    let inspector = app
        .register_user("20987654321", "insp@example.com", "inspector")
        .await;
    let admin = app
        .register_user("20555555555", "adm@example.com", "administrador")
        .await;

    let denied = app
        .request("GET", "/api/admin/descargas", None, Some(&inspector))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let empty = app
        .request("GET", "/api/admin/descargas", None, Some(&admin))
        .await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["total"], 0);
    assert_eq!(empty.body["descargas"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_root_reports_service_info() {
    let app = TestApp::new();
    let response = app.request("GET", "/", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "running");
}
