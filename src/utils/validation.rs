//! Utilidades de validación
//!
//! Funciones helper usadas por los DTOs (`#[validate(custom = ...)]`) y por
//! los controladores para validar datos en el momento de ingreso.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::models::document::DATE_FORMAT;
use crate::models::vehicle::normalize_plate;

lazy_static! {
    /// Placas colombianas: ABC123 (carros) o ABC12D (motos)
    static ref LICENSE_PLATE_RE: Regex = Regex::new(r"^[A-Z]{3}[0-9]{2}[0-9A-Z]$").unwrap();
    static ref NATIONAL_ID_RE: Regex = Regex::new(r"^[0-9]{5,12}$").unwrap();
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Variante para `#[validate(custom = ...)]`
pub fn validate_date_field(value: &str) -> Result<(), ValidationError> {
    validate_date(value).map(|_| ())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 7 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de placa de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    if !LICENSE_PLATE_RE.is_match(&normalize_plate(value)) {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"ABC123".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar número de cédula
pub fn validate_national_id(value: &str) -> Result<(), ValidationError> {
    if !NATIONAL_ID_RE.is_match(value.trim()) {
        let mut error = ValidationError::new("national_id");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
