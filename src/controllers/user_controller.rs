use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::dto::{ApiResponse, SearchQuery};
use crate::models::{User, UserProfile};
use crate::repositories::UserRepository;
use crate::services::auth_service::{hash_password, AuthService};
use crate::services::authorization_service::AuthorizationService;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct UserController {
    repository: UserRepository,
    auth: AuthService,
    bcrypt_cost: u32,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: UserRepository::new(&state.store),
            auth: state.auth_service(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    pub async fn list(&self, user: &User, query: &SearchQuery) -> AppResult<Vec<UserProfile>> {
        AuthorizationService::require_user_manager(user)?;
        Ok(self
            .repository
            .list()
            .await
            .iter()
            .filter(|u| {
                query.matches(&[
                    u.full_name.as_str(),
                    u.national_id.as_str(),
                    u.email.as_str(),
                    u.role.as_str(),
                ])
            })
            .map(UserProfile::from)
            .collect())
    }

    pub async fn create(
        &self,
        user: &User,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserProfile>, AppError> {
        AuthorizationService::require_user_manager(user)?;
        request.validate()?;

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let created = self
            .repository
            .create(request.into_user(Uuid::new_v4().to_string(), password_hash))
            .await?;
        info!("👤 User {} ({}) created by {}", created.email, created.role.as_str(), user.email);

        Ok(ApiResponse::success_with_message(
            UserProfile::from(&created),
            "Usuario creado exitosamente",
        ))
    }

    pub async fn update(
        &self,
        user: &User,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserProfile>, AppError> {
        AuthorizationService::require_user_manager(user)?;
        request.validate()?;

        let mut updated = self.repository.update(id, |u| request.apply_profile(u)).await?;
        if let Some(password) = &request.password {
            updated = self.auth.reset_password(id, password).await?;
        }

        Ok(ApiResponse::success_with_message(
            UserProfile::from(&updated),
            "Usuario actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, user: &User, id: &str) -> Result<ApiResponse<()>, AppError> {
        AuthorizationService::require_user_manager(user)?;
        if user.id == id {
            return Err(AppError::BadRequest("Cannot delete your own account".to_string()));
        }
        let deleted = self.repository.delete(id).await?;
        info!("🗑️ User {} deleted by {}", deleted.email, user.email);
        Ok(ApiResponse::message("Usuario eliminado exitosamente"))
    }
}
