use axum::{
    extract::State,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::controllers::report_controller::ReportController;
use crate::dto::auth_dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MeResponse, RecoverPasswordRequest,
    SecurityQuestionsRequest,
};
use crate::dto::report_dto::HomeResponse;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas: login y recuperación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/recover", post(recover))
}

/// Rutas del usuario autenticado
pub fn create_me_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/me/password", put(change_password))
        .route("/me/security-questions", put(set_security_questions))
        .route("/home", get(home))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn recover(
    State(state): State<AppState>,
    Json(request): Json<RecoverPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.recover(request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Json<MeResponse> {
    let controller = AuthController::new(&state);
    Json(controller.me(&current))
}

async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.change_password(&current, request).await?;
    Ok(Json(response))
}

async fn set_security_questions(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(request): Json<SecurityQuestionsRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.set_security_questions(&current, request).await?;
    Ok(Json(response))
}

async fn home(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Json<HomeResponse> {
    let controller = ReportController::new(&state);
    Json(controller.home(&current.user).await)
}
