//! Rutas HTTP
//!
//! `create_router` arma la API completa: `/health` y `/api/auth/*` son
//! públicas, el resto pasa por `auth_middleware`.

pub mod auth_routes;
pub mod check_item_routes;
pub mod driver_routes;
pub mod inspection_routes;
pub mod report_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth_routes::create_me_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/check-items", check_item_routes::create_check_item_router())
        .nest("/users", user_routes::create_user_router())
        .nest("/inspection", inspection_routes::create_inspection_router())
        .nest("/reports", report_routes::create_report_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .merge(protected);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
