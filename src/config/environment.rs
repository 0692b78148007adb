//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Errores al leer la configuración
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
    /// Intentos fallidos antes de bloquear la cuenta
    pub max_failed_logins: u32,
    /// Días antes del vencimiento en que un documento pasa a "próximo a vencer"
    pub near_expiry_days: i64,
    /// Desfase del calendario local respecto a UTC (Colombia: -300)
    pub utc_offset_minutes: i32,
    pub seed_path: Option<String>,
    pub submodules_path: Option<String>,
    /// Exclusión por nombre para el chequeo simplificado (vacía por defecto)
    pub simplified_name_exclusions: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "development-secret-change-in-production".to_string(),
            jwt_expiration_hours: 12,
            cors_origins: Vec::new(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_failed_logins: 3,
            near_expiry_days: 30,
            utc_offset_minutes: -300,
            seed_path: None,
            submodules_path: None,
            simplified_name_exclusions: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    /// Lee la configuración del entorno; las variables ausentes toman el valor por defecto
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration_hours: parse_var("JWT_EXPIRATION_HOURS", defaults.jwt_expiration_hours)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|s| split_list(&s))
                .unwrap_or(defaults.cors_origins),
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
            max_failed_logins: parse_var("MAX_FAILED_LOGINS", defaults.max_failed_logins)?,
            near_expiry_days: parse_var("NEAR_EXPIRY_DAYS", defaults.near_expiry_days)?,
            utc_offset_minutes: parse_offset()?,
            seed_path: env::var("SEED_PATH").ok(),
            submodules_path: env::var("SUBMODULES_PATH").ok(),
            simplified_name_exclusions: env::var("SIMPLIFIED_NAME_EXCLUSIONS")
                .map(|s| split_list(&s))
                .unwrap_or(defaults.simplified_name_exclusions),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Zona horaria del calendario local
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Fecha de hoy en el calendario local
    pub fn today(&self) -> NaiveDate {
        self.local_date(Utc::now())
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.utc_offset()).date_naive()
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

fn parse_offset() -> Result<i32, ConfigError> {
    let minutes: i32 = parse_var("UTC_OFFSET_MINUTES", -300)?;
    if minutes.abs() > 14 * 60 {
        return Err(ConfigError::Invalid {
            var: "UTC_OFFSET_MINUTES",
            value: minutes.to_string(),
        });
    }
    Ok(minutes)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
