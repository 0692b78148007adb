//! Modelo de User (inspectores y administradores)
//!
//! Las credenciales solo se guardan como hash bcrypt. `UserProfile` es la vista
//! pública sin credenciales; también es la copia que se congela en cada reporte.

use serde::{Deserialize, Serialize};

use super::auth::UserRole;

/// Respuestas de seguridad (hash bcrypt de cada respuesta normalizada)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAnswers {
    pub color_hash: String,
    pub number_hash: String,
    pub animal_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub national_id: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub password_hash: String,
    pub security_answers: Option<SecurityAnswers>,
    #[serde(default)]
    pub failed_login_attempts: u32,
    #[serde(default)]
    pub is_blocked: bool,
}

/// Datos del usuario sin credenciales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub national_id: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            national_id: user.national_id.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
        }
    }
}

/// Emails se comparan sin mayúsculas ni espacios
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
