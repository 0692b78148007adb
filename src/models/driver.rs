//! Modelo de Driver (conductor)

use serde::{Deserialize, Serialize};

use super::document::ExpiryDate;

/// Conductor que puede ser asignado a un vehículo para la inspección
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub full_name: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub license_expiry: ExpiryDate,
}
