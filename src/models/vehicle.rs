//! Modelo de Vehicle
//!
//! Un vehículo de la flota con sus cinco documentos con vencimiento.

use serde::{Deserialize, Serialize};

use super::document::{DocumentKind, ExpiryDate};

/// Vehículo de la flota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub vehicle_type: String,
    /// Seguro obligatorio (SOAT)
    pub soat_expiry: ExpiryDate,
    /// Revisión técnico-mecánica (RTM)
    pub rtm_expiry: ExpiryDate,
    /// Tarjeta de operación (TO)
    pub operating_card_expiry: ExpiryDate,
    pub rcc_policy_expiry: ExpiryDate,
    pub rce_policy_expiry: ExpiryDate,
}

impl Vehicle {
    /// Documentos del vehículo en el orden en que se reportan
    pub fn documents(&self) -> [(DocumentKind, &ExpiryDate); 5] {
        [
            (DocumentKind::Soat, &self.soat_expiry),
            (DocumentKind::Rtm, &self.rtm_expiry),
            (DocumentKind::OperatingCard, &self.operating_card_expiry),
            (DocumentKind::RccPolicy, &self.rcc_policy_expiry),
            (DocumentKind::RcePolicy, &self.rce_policy_expiry),
        ]
    }

    pub fn normalized_plate(&self) -> String {
        normalize_plate(&self.license_plate)
    }
}

/// Las placas se comparan sin espacios ni guiones y en mayúsculas
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
