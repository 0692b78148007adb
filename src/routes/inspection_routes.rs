use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};

use crate::controllers::inspection_controller::InspectionController;
use crate::dto::inspection_dto::{
    AttachmentRequest, MarkGoodRequest, MarkGoodResponse, SelectRequest, SelectResponse, SessionResponse,
    SignaturesRequest, UpdateItemRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Report;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_inspection_router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_session))
        .route("/select", post(select))
        .route("/start", post(start))
        .route("/items/:item_id", put(update_item))
        .route("/items/:item_id/attachments", post(add_item_attachment))
        .route("/items/:item_id/attachments/:index", delete(remove_item_attachment))
        .route("/attachments", post(add_general_attachment))
        .route("/attachments/:index", delete(remove_general_attachment))
        .route("/mark-good", post(mark_good))
        .route("/signature", post(proceed_to_signature))
        .route("/back", post(back_to_inspect))
        .route("/signatures", put(set_signatures))
        .route("/finalize", post(finalize))
        .route("/reset", post(reset))
}

type SessionResult = Result<Json<SessionResponse>, AppError>;

async fn view_session(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.view(&current.user).await?))
}

async fn select(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<SelectResponse>, AppError> {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.select(&current.user, request).await?))
}

async fn start(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.start(&current.user).await?))
}

async fn update_item(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(item_id): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.update_item(&current.user, &item_id, request).await?))
}

async fn add_item_attachment(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(item_id): Path<String>,
    Json(request): Json<AttachmentRequest>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.add_item_attachment(&current.user, &item_id, request).await?))
}

async fn remove_item_attachment(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path((item_id, index)): Path<(String, usize)>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.remove_item_attachment(&current.user, &item_id, index).await?))
}

async fn add_general_attachment(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<AttachmentRequest>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.add_general_attachment(&current.user, request).await?))
}

async fn remove_general_attachment(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(index): Path<usize>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.remove_general_attachment(&current.user, index).await?))
}

async fn mark_good(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<MarkGoodRequest>,
) -> Result<Json<MarkGoodResponse>, AppError> {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.mark_good(&current.user, request).await?))
}

async fn proceed_to_signature(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.proceed_to_signature(&current.user).await?))
}

async fn back_to_inspect(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.back_to_inspect(&current.user).await?))
}

async fn set_signatures(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<SignaturesRequest>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.set_signatures(&current.user, request).await?))
}

async fn finalize(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Report>>, AppError> {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.finalize(&current.user).await?))
}

async fn reset(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> SessionResult {
    let controller = InspectionController::new(&state);
    Ok(Json(controller.reset(&current.user).await?))
}
