use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Json, Router,
};

use crate::controllers::check_item_controller::CheckItemController;
use crate::dto::check_item_dto::{ApplicableItemsResponse, CreateCheckItemRequest, UpdateCheckItemRequest};
use crate::dto::{ApiResponse, SearchQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::CheckItem;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_check_item_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/applicable", get(applicable_items))
        .route("/:id", put(update_item).delete(delete_item))
}

async fn list_items(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Json<Vec<CheckItem>> {
    let controller = CheckItemController::new(&state);
    Json(controller.list(&query).await)
}

/// Lista de chequeo agrupada para el tipo de inspección del usuario
async fn applicable_items(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Json<ApplicableItemsResponse>, AppError> {
    let controller = CheckItemController::new(&state);
    let response = controller.applicable(&current.user).await?;
    Ok(Json(response))
}

async fn create_item(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<CreateCheckItemRequest>,
) -> Result<Json<ApiResponse<CheckItem>>, AppError> {
    let controller = CheckItemController::new(&state);
    let response = controller.create(&current.user, request).await?;
    Ok(Json(response))
}

async fn update_item(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCheckItemRequest>,
) -> Result<Json<ApiResponse<CheckItem>>, AppError> {
    let controller = CheckItemController::new(&state);
    let response = controller.update(&current.user, &id, request).await?;
    Ok(Json(response))
}

async fn delete_item(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CheckItemController::new(&state);
    let response = controller.delete(&current.user, &id).await?;
    Ok(Json(response))
}
