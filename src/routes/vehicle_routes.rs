use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDocumentsResponse, VehicleResponse,
};
use crate::dto::{ApiResponse, SearchQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", put(update_vehicle).delete(delete_vehicle))
        .route("/:id/documents", get(vehicle_documents))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<VehicleResponse>> {
    let controller = VehicleController::new(&state);
    Json(controller.list(&query, state.config.today()).await)
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller
        .create(&current.user, request, state.config.today())
        .await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller
        .update(&current.user, &id, request, state.config.today())
        .await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.delete(&current.user, &id).await?;
    Ok(Json(response))
}

async fn vehicle_documents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleDocumentsResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.documents(&id, state.config.today()).await?;
    Ok(Json(response))
}
