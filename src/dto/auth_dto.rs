use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserProfile;
use crate::services::auth_service::PlainSecurityAnswers;
use crate::services::authorization_service::Capabilities;
use crate::utils::validation::{validate_national_id, validate_not_empty};

// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Response de login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserProfile,
    pub capabilities: Capabilities,
}

// Usuario actual con sus capacidades
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
    pub capabilities: Capabilities,
    pub has_security_questions: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 4))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SecurityQuestionsRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(custom = "validate_not_empty")]
    pub color: String,
    #[validate(custom = "validate_not_empty")]
    pub number: String,
    #[validate(custom = "validate_not_empty")]
    pub animal: String,
}

impl SecurityQuestionsRequest {
    pub fn answers(&self) -> PlainSecurityAnswers {
        PlainSecurityAnswers {
            color: self.color.clone(),
            number: self.number.clone(),
            animal: self.animal.clone(),
        }
    }
}

// Recuperación de contraseña por cédula y preguntas de seguridad
#[derive(Debug, Deserialize, Validate)]
pub struct RecoverPasswordRequest {
    #[validate(custom = "validate_national_id")]
    pub national_id: String,
    #[validate(custom = "validate_not_empty")]
    pub color: String,
    #[validate(custom = "validate_not_empty")]
    pub number: String,
    #[validate(custom = "validate_not_empty")]
    pub animal: String,
    #[validate(length(min = 4))]
    pub new_password: String,
}

impl RecoverPasswordRequest {
    pub fn answers(&self) -> PlainSecurityAnswers {
        PlainSecurityAnswers {
            color: self.color.clone(),
            number: self.number.clone(),
            animal: self.animal.clone(),
        }
    }
}
