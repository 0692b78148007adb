//! Servicio de autenticación
//!
//! Contraseñas y respuestas de seguridad solo se guardan como hash bcrypt.
//! Tras `max_failed_logins` intentos fallidos la cuenta queda bloqueada hasta
//! que se recupere con las preguntas de seguridad o un administrador cambie la
//! contraseña.

use bcrypt::{hash, verify};
use tracing::{info, warn};

use crate::models::user::SecurityAnswers;
use crate::models::User;
use crate::repositories::{FleetStore, UserRepository};
use crate::services::jwt_service::JwtService;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Respuestas en texto plano tal como llegan del cliente
#[derive(Debug, Clone)]
pub struct PlainSecurityAnswers {
    pub color: String,
    pub number: String,
    pub animal: String,
}

pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    hash(password, cost).map_err(|e| AppError::Hash(e.to_string()))
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    verify(password, password_hash).map_err(|e| AppError::Hash(e.to_string()))
}

fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

fn check_length(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must have at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub struct AuthService {
    users: UserRepository,
    jwt: JwtService,
    max_failed_logins: u32,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: &FleetStore, jwt: JwtService, max_failed_logins: u32, bcrypt_cost: u32) -> Self {
        Self {
            users: UserRepository::new(store),
            jwt,
            max_failed_logins,
            bcrypt_cost,
        }
    }

    /// Autentica con email y contraseña y devuelve el token y el usuario
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if user.is_blocked {
            warn!("🔒 Login attempt on blocked account {}", user.email);
            return Err(AppError::Forbidden(
                "Account blocked after too many failed attempts; recover your password".to_string(),
            ));
        }

        if !verify_password(password, &user.password_hash)? {
            let max = self.max_failed_logins;
            let updated = self
                .users
                .update(&user.id, |u| {
                    u.failed_login_attempts += 1;
                    if u.failed_login_attempts >= max {
                        u.is_blocked = true;
                    }
                })
                .await?;

            if updated.is_blocked {
                warn!("🔒 Account {} blocked after {} failed logins", updated.email, updated.failed_login_attempts);
                return Err(AppError::Forbidden(
                    "Account blocked after too many failed attempts; recover your password".to_string(),
                ));
            }
            warn!("❌ Failed login for {} ({}/{})", updated.email, updated.failed_login_attempts, max);
            return Err(AppError::Unauthorized(format!(
                "Invalid credentials; {} attempt(s) left",
                max.saturating_sub(updated.failed_login_attempts)
            )));
        }

        let user = if user.failed_login_attempts > 0 {
            self.users.update(&user.id, |u| u.failed_login_attempts = 0).await?
        } else {
            user
        };

        let token = self.jwt.generate_access_token(&user)?;
        info!("🔑 Login successful for {} ({})", user.email, user.role.as_str());
        Ok((token, user))
    }

    pub async fn change_password(&self, user_id: &str, current: &str, new_password: &str) -> AppResult<User> {
        let user = self.require_current_password(user_id, current).await?;
        self.reset_password(&user.id, new_password).await
    }

    /// Fija una contraseña nueva y desbloquea la cuenta
    pub async fn reset_password(&self, user_id: &str, new_password: &str) -> AppResult<User> {
        check_length(new_password)?;
        let password_hash = hash_password(new_password, self.bcrypt_cost)?;
        let user = self
            .users
            .update(user_id, |u| {
                u.password_hash = password_hash;
                u.failed_login_attempts = 0;
                u.is_blocked = false;
            })
            .await?;
        info!("🔐 Password updated for {}", user.email);
        Ok(user)
    }

    pub async fn set_security_answers(
        &self,
        user_id: &str,
        current_password: &str,
        answers: &PlainSecurityAnswers,
    ) -> AppResult<User> {
        let user = self.require_current_password(user_id, current_password).await?;
        let hashed = SecurityAnswers {
            color_hash: hash_password(&normalize_answer(&answers.color), self.bcrypt_cost)?,
            number_hash: hash_password(&normalize_answer(&answers.number), self.bcrypt_cost)?,
            animal_hash: hash_password(&normalize_answer(&answers.animal), self.bcrypt_cost)?,
        };
        self.users.update(&user.id, |u| u.security_answers = Some(hashed)).await
    }

    /// Recupera la contraseña por cédula y respuestas de seguridad
    pub async fn recover(
        &self,
        national_id: &str,
        answers: &PlainSecurityAnswers,
        new_password: &str,
    ) -> AppResult<User> {
        let user = self
            .users
            .list()
            .await
            .into_iter()
            .find(|u| u.national_id == national_id.trim())
            .ok_or_else(|| AppError::NotFound(format!("No user with national id '{}'", national_id)))?;

        let stored = user
            .security_answers
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("This user has not configured security questions".to_string()))?;

        let matches = verify_password(&normalize_answer(&answers.color), &stored.color_hash)?
            && verify_password(&normalize_answer(&answers.number), &stored.number_hash)?
            && verify_password(&normalize_answer(&answers.animal), &stored.animal_hash)?;
        if !matches {
            warn!("❌ Wrong security answers for {}", user.email);
            return Err(AppError::Unauthorized("Security answers do not match".to_string()));
        }

        self.reset_password(&user.id, new_password).await
    }

    async fn require_current_password(&self, user_id: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .ok_or_else(|| not_found_error("User", user_id))?;
        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Current password is incorrect".to_string()));
        }
        Ok(user)
    }
}
