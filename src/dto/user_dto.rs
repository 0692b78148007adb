use serde::Deserialize;
use validator::Validate;

use crate::models::auth::UserRole;
use crate::models::User;
use crate::utils::validation::{validate_national_id, validate_not_empty, validate_phone};

// Request para crear un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom = "validate_not_empty")]
    pub full_name: String,
    #[validate(custom = "validate_national_id")]
    pub national_id: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    pub role: UserRole,
    #[validate(length(min = 4))]
    pub password: String,
}

impl CreateUserRequest {
    pub fn into_user(self, id: String, password_hash: String) -> User {
        User {
            id,
            full_name: self.full_name.trim().to_string(),
            national_id: self.national_id.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            role: self.role,
            password_hash,
            security_answers: None,
            failed_login_attempts: 0,
            is_blocked: false,
        }
    }
}

// Request para actualizar un usuario; `password` la restablece y desbloquea la cuenta
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom = "validate_not_empty")]
    pub full_name: Option<String>,
    #[validate(custom = "validate_national_id")]
    pub national_id: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(min = 4))]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Aplica los datos de perfil; la contraseña se maneja aparte
    pub fn apply_profile(&self, user: &mut User) {
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.trim().to_string();
        }
        if let Some(national_id) = &self.national_id {
            user.national_id = national_id.trim().to_string();
        }
        if let Some(email) = &self.email {
            user.email = email.trim().to_string();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.trim().to_string();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}
