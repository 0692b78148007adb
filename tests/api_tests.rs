//! Tests de la API HTTP con `tower::ServiceExt::oneshot`

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fleet_inspection::{create_router, AppState};

use common::*;

fn create_test_app() -> Router {
    let config = config();
    let store = store(config.today());
    create_router(AppState::new(config, store, catalog_config()))
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Recorre el flujo completo y devuelve el id del reporte
async fn complete_inspection(app: &Router, token: &str) -> String {
    let (status, preview) = send(
        app,
        Method::POST,
        "/api/inspection/select",
        Some(token),
        Some(json!({ "vehicle_id": "v1", "driver_id": "c1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["verdict"]["blocked"], false);

    let (status, session) = send(app, Method::POST, "/api/inspection/start", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["step"], "inspect");

    let (status, marked) = send(
        app,
        Method::POST,
        "/api/inspection/mark-good",
        Some(token),
        Some(json!({ "scope": "all" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["marked"], 3);

    let (status, _) = send(app, Method::POST, "/api/inspection/signature", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app,
        Method::PUT,
        "/api/inspection/signatures",
        Some(token),
        Some(json!({ "inspector": "data:image/png;base64,AAA", "driver": "data:image/png;base64,BBB" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app, Method::POST, "/api/inspection/finalize", Some(token), None).await;
    assert_eq!(status, StatusCode::OK, "finalize failed: {}", body);
    assert_eq!(body["success"], true);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = create_test_app();

    let (status, _) = send(&app, Method::GET, "/api/vehicles", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/reports", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "admin@transtimbio.com", "password": "incorrecta" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_never_exposes_credentials() {
    let app = create_test_app();
    let token = login(&app, "mantenimiento@transtimbio.com").await;

    let (status, body) = send(&app, Method::GET, "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "Mantenimiento");
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["has_security_questions"], false);
}

#[tokio::test]
async fn test_inspection_flow_over_http() {
    let app = create_test_app();
    let token = login(&app, "mantenimiento@transtimbio.com").await;

    let report_id = complete_inspection(&app, &token).await;

    let (status, list) = send(&app, Method::GET, "/api/reports", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["reports"][0]["id"], report_id.as_str());
    assert_eq!(list["reports"][0]["inspection_type"], "Mantenimiento");
    assert!(list["reports"][0]["inspector"].get("password_hash").is_none());

    let (status, stats) = send(&app, Method::GET, "/api/reports/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["today_counts"]["total"], 1);
    assert_eq!(stats["own_month_counts"]["full"], 1);
}

#[tokio::test]
async fn test_incomplete_checklist_is_unprocessable() {
    let app = create_test_app();
    let token = login(&app, "isla@transtimbio.com").await;

    send(
        &app,
        Method::POST,
        "/api/inspection/select",
        Some(&token),
        Some(json!({ "vehicle_id": "v1", "driver_id": "c1" })),
    )
    .await;
    send(&app, Method::POST, "/api/inspection/start", Some(&token), None).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/inspection/items/i1",
        Some(&token),
        Some(json!({ "state": "mal" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/api/inspection/signature", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INCOMPLETE_CHECKLIST");
    assert_eq!(body["details"]["first_incomplete_item"], "i1");
    assert_eq!(body["details"]["incomplete_count"], 3);

    let (status, _) = send(&app, Method::POST, "/api/inspection/finalize", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = send(&app, Method::GET, "/api/reports", Some(&token), None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_reports_are_scoped_by_role() {
    let app = create_test_app();
    let owner = login(&app, "isla@transtimbio.com").await;
    let other = login(&app, "isla2@transtimbio.com").await;
    let admin = login(&app, "admin@transtimbio.com").await;

    let report_id = complete_inspection(&app, &owner).await;
    let uri = format!("/api/reports/{}", report_id);

    let (status, report) = send(&app, Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["inspection_type"], "Planillaje");

    let (status, _) = send(&app, Method::GET, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, Method::GET, "/api/reports", Some(&other), None).await;
    assert_eq!(list["total"], 0);

    let (status, _) = send(&app, Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_role_permissions() {
    let app = create_test_app();
    let admin = login(&app, "admin@transtimbio.com").await;
    let operator = login(&app, "isla@transtimbio.com").await;

    // Los administradores no inspeccionan
    let (status, _) = send(&app, Method::POST, "/api/inspection/start", Some(&admin), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let new_vehicle = json!({
        "license_plate": "QWE456",
        "brand": "Hino",
        "model": "Dutro",
        "vehicle_type": "Camión",
        "soat_expiry": "2030-01-01",
        "rtm_expiry": "2030-01-01",
        "operating_card_expiry": "2030-01-01",
        "rcc_policy_expiry": "2030-01-01",
        "rce_policy_expiry": "2030-01-01"
    });

    let (status, _) = send(&app, Method::POST, "/api/vehicles", Some(&operator), Some(new_vehicle.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::POST, "/api/vehicles", Some(&admin), Some(new_vehicle)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    assert_eq!(body["data"]["license_plate"], "QWE456");
    assert_eq!(body["data"]["status"], "ok");

    let (status, _) = send(&app, Method::GET, "/api/users", Some(&operator), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_catalog_lists_accept_search() {
    let app = create_test_app();
    let admin = login(&app, "admin@transtimbio.com").await;

    let (status, drivers) = send(&app, Method::GET, "/api/drivers?search=80123", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(drivers.as_array().unwrap().len(), 1);
    assert_eq!(drivers[0]["full_name"], "Roberto Pérez");

    let (_, drivers) = send(&app, Method::GET, "/api/drivers?search=nadie", Some(&admin), None).await;
    assert!(drivers.as_array().unwrap().is_empty());

    let (_, vehicles) = send(&app, Method::GET, "/api/vehicles?search=abc", Some(&admin), None).await;
    assert_eq!(vehicles.as_array().unwrap().len(), 1);

    let (_, items) = send(&app, Method::GET, "/api/check-items?search=LLANTAS", Some(&admin), None).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "i3");

    let (_, users) = send(&app, Method::GET, "/api/users?search=isla", Some(&admin), None).await;
    assert_eq!(users.as_array().unwrap().len(), 2);

    let (_, users) = send(&app, Method::GET, "/api/users", Some(&admin), None).await;
    assert_eq!(users.as_array().unwrap().len(), 4);
}
