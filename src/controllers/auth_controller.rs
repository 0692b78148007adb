use validator::Validate;

use crate::dto::auth_dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MeResponse, RecoverPasswordRequest,
    SecurityQuestionsRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::UserProfile;
use crate::services::auth_service::AuthService;
use crate::services::authorization_service::Capabilities;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct AuthController {
    service: AuthService,
    expires_in: i64,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.auth_service(),
            expires_in: state.jwt.expires_in_seconds(),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<LoginResponse>, AppError> {
        request.validate()?;
        let (token, user) = self.service.login(&request.email, &request.password).await?;

        Ok(ApiResponse::success_with_message(
            LoginResponse {
                token,
                token_type: "Bearer",
                expires_in: self.expires_in,
                capabilities: Capabilities::for_role(user.role),
                user: UserProfile::from(&user),
            },
            format!("Bienvenido, {}", user.full_name),
        ))
    }

    pub async fn recover(&self, request: RecoverPasswordRequest) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;
        self.service
            .recover(&request.national_id, &request.answers(), &request.new_password)
            .await?;
        Ok(ApiResponse::message("Contraseña restablecida exitosamente"))
    }

    pub fn me(&self, current: &AuthenticatedUser) -> MeResponse {
        MeResponse {
            user: UserProfile::from(&current.user),
            capabilities: current.capabilities,
            has_security_questions: current.user.security_answers.is_some(),
        }
    }

    pub async fn change_password(
        &self,
        current: &AuthenticatedUser,
        request: ChangePasswordRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;
        self.service
            .change_password(&current.user.id, &request.current_password, &request.new_password)
            .await?;
        Ok(ApiResponse::message("Contraseña actualizada exitosamente"))
    }

    pub async fn set_security_questions(
        &self,
        current: &AuthenticatedUser,
        request: SecurityQuestionsRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;
        self.service
            .set_security_answers(&current.user.id, &request.current_password, &request.answers())
            .await?;
        Ok(ApiResponse::message("Preguntas de seguridad configuradas"))
    }
}
