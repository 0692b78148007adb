use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::dto::driver_dto::{CreateDriverRequest, DriverResponse, UpdateDriverRequest};
use crate::dto::{ApiResponse, SearchQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/:id", put(update_driver).delete(delete_driver))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<DriverResponse>> {
    let controller = DriverController::new(&state);
    Json(controller.list(&query, state.config.today()).await)
}

async fn create_driver(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller
        .create(&current.user, request, state.config.today())
        .await?;
    Ok(Json(response))
}

async fn update_driver(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller
        .update(&current.user, &id, request, state.config.today())
        .await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.delete(&current.user, &id).await?;
    Ok(Json(response))
}
