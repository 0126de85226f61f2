//! Integration tests for the authentication flow.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "ana@example.com",
                "cuit_cuil": "20111222333",
                "nombre": "Ana",
                "apellido": "Martínez",
                "telefono": "+54 11 1112-2233",
                "password": "Elefante#Verde99",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access_token"].as_str().is_some());
    assert_eq!(response.body["token_type"], "bearer");
    // Role defaults to citizen and the hash never leaks.
    assert_eq!(response.body["user"]["role"], "ciudadano");
    assert!(response.body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_cuit_is_conflict() {
    let app = TestApp::new();
    app.register_user("20111222333", "ana@example.com", "ciudadano")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "otra@example.com",
                "cuit_cuil": "20111222333",
                "nombre": "Ana",
                "apellido": "Martínez",
                "telefono": "+54 11 1112-2233",
                "password": "Elefante#Verde99",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "not-an-email",
                "cuit_cuil": "20111222333",
                "nombre": "Ana",
                "apellido": "Martínez",
                "telefono": "+54 11 1112-2233",
                "password": "Elefante#Verde99",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.register_user("20111222333", "ana@example.com", "ciudadano")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "cuit_cuil": "20111222333",
                "password": "wrong",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_and_honors_bearer() {
    let app = TestApp::new();
    let token = app
        .register_user("20111222333", "ana@example.com", "inspector")
        .await;

    let anonymous = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["cuit_cuil"], "20111222333");
    assert_eq!(me.body["role"], "inspector");
}
