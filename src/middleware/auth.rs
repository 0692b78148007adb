//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    models::User,
    repositories::UserRepository,
    services::authorization_service::Capabilities,
    services::jwt_service::extract_bearer_token,
    state::AppState,
    utils::errors::AppError,
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub capabilities: Capabilities,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;
    let token = extract_bearer_token(auth_header)?;

    let claims = state.jwt.validate_token(token)?;

    // El usuario debe seguir existiendo y no estar bloqueado
    let user = UserRepository::new(&state.store)
        .find_by_id(&claims.sub)
        .await
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
    if user.is_blocked {
        return Err(AppError::Forbidden("Account is blocked".to_string()));
    }

    // Se usa el rol actual, no el del token
    let authenticated_user = AuthenticatedUser {
        capabilities: Capabilities::for_role(user.role),
        user,
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}
