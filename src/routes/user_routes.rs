use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::dto::{ApiResponse, SearchQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::UserProfile;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", put(update_user).delete(delete_user))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.list(&current.user, &query).await?;
    Ok(Json(response))
}

async fn create_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.create(&current.user, request).await?;
    Ok(Json(response))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.update(&current.user, &id, request).await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.delete(&current.user, &id).await?;
    Ok(Json(response))
}
