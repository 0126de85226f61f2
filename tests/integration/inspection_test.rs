//! Integration tests for inspection scheduling and visibility.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

async fn inspector_id(app: &TestApp, token: &str) -> String {
    let me = app.request("GET", "/api/auth/me", None, Some(token)).await;
    me.body["id"].as_str().unwrap().to_string()
}

fn schedule_payload(afap_id: &str, inspector_id: &str) -> serde_json::Value {
    serde_json::json!({
        "afap_id": afap_id,
        "inspector_id": inspector_id,
        "fecha_programada": "2026-09-15T10:00:00Z",
        "observaciones": "Inspección inicial",
    })
}

#[tokio::test]
async fn test_citizen_cannot_schedule() {
    let app = TestApp::new();
    let citizen = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let inspector = app
        .register_user("20987654321", "insp@example.com", "inspector")
        .await;
    let permit = app.create_permit(&citizen).await;
    let inspector_id = inspector_id(&app, &inspector).await;

    let response = app
        .request(
            "POST",
            "/api/inspecciones",
            Some(schedule_payload(
                permit["id"].as_str().unwrap(),
                &inspector_id,
            )),
            Some(&citizen),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dangling_references_are_rejected() {
    let app = TestApp::new();
    let citizen = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let inspector = app
        .register_user("20987654321", "insp@example.com", "inspector")
        .await;
    let admin = app
        .register_user("20555555555", "adm@example.com", "administrador")
        .await;
    let permit = app.create_permit(&citizen).await;
    let permit_id = permit["id"].as_str().unwrap().to_string();
    let inspector_id = inspector_id(&app, &inspector).await;

    // Unknown permit.
    let response = app
        .request(
            "POST",
            "/api/inspecciones",
            Some(schedule_payload(&Uuid::new_v4().to_string(), &inspector_id)),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Unknown assignee.
    let response = app
        .request(
            "POST",
            "/api/inspecciones",
            Some(schedule_payload(&permit_id, &Uuid::new_v4().to_string())),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Valid schedule succeeds and opens as programada.
    let response = app
        .request(
            "POST",
            "/api/inspecciones",
            Some(schedule_payload(&permit_id, &inspector_id)),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["estado"], "programada");
    assert!(response.body["resultado"].is_null());
}

#[tokio::test]
async fn test_listing_scopes_per_role() {
    let app = TestApp::new();
    let citizen = app
        .register_user("20123456789", "juan@example.com", "ciudadano")
        .await;
    let other_citizen = app
        .register_user("20111222333", "ana@example.com", "ciudadano")
        .await;
    let inspector_a = app
        .register_user("20987654321", "insp-a@example.com", "inspector")
        .await;
    let inspector_b = app
        .register_user("20987654322", "insp-b@example.com", "inspector")
        .await;
    let admin = app
        .register_user("20555555555", "adm@example.com", "administrador")
        .await;

    let permit_a = app.create_permit(&citizen).await;
    let permit_b = app.create_permit(&other_citizen).await;
    let inspector_a_id = inspector_id(&app, &inspector_a).await;
    let inspector_b_id = inspector_id(&app, &inspector_b).await;

    for (permit, inspector) in [
        (&permit_a, &inspector_a_id),
        (&permit_b, &inspector_b_id),
    ] {
        let response = app
            .request(
                "POST",
                "/api/inspecciones",
                Some(schedule_payload(permit["id"].as_str().unwrap(), inspector)),
                Some(&admin),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    // Administrator sees both.
    let all = app
        .request("GET", "/api/inspecciones", None, Some(&admin))
        .await;
    assert_eq!(all.body.as_array().unwrap().len(), 2);

    // Inspector A sees only their assignment.
    let own = app
        .request("GET", "/api/inspecciones", None, Some(&inspector_a))
        .await;
    let own = own.body.as_array().unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0]["inspector_id"].as_str().unwrap(), inspector_a_id);

    // The citizen sees the inspection of their own permit only.
    let mine = app
        .request("GET", "/api/inspecciones", None, Some(&citizen))
        .await;
    let mine = mine.body.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["afap_id"], permit_a["id"]);
}
