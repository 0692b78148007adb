use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::ReportListResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Report;
use crate::services::report_query_service::{ReportFilter, StatsPanel};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports))
        .route("/stats", get(report_stats))
        .route("/:id", get(get_report))
}

async fn list_reports(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Query(filter): Query<ReportFilter>,
) -> Json<ReportListResponse> {
    let controller = ReportController::new(&state);
    Json(controller.list(&current.user, &filter).await)
}

async fn report_stats(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Json<StatsPanel> {
    let controller = ReportController::new(&state);
    Json(controller.stats(&current.user).await)
}

async fn get_report(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<Report>, AppError> {
    let controller = ReportController::new(&state);
    let report = controller.get(&current.user, &id).await?;
    Ok(Json(report))
}
