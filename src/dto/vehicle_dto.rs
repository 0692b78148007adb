use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::normalize_plate;
use crate::models::{ExpiryDate, Vehicle};
use crate::services::eligibility_service::{DocumentReport, OverallStatus};
use crate::utils::validation::{validate_date_field, validate_license_plate, validate_not_empty};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: String,
    #[validate(custom = "validate_not_empty")]
    pub brand: String,
    #[validate(custom = "validate_not_empty")]
    pub model: String,
    #[validate(custom = "validate_not_empty")]
    pub vehicle_type: String,
    #[validate(custom = "validate_date_field")]
    pub soat_expiry: String,
    #[validate(custom = "validate_date_field")]
    pub rtm_expiry: String,
    #[validate(custom = "validate_date_field")]
    pub operating_card_expiry: String,
    #[validate(custom = "validate_date_field")]
    pub rcc_policy_expiry: String,
    #[validate(custom = "validate_date_field")]
    pub rce_policy_expiry: String,
}

impl CreateVehicleRequest {
    pub fn into_vehicle(self, id: String) -> Vehicle {
        Vehicle {
            id,
            license_plate: normalize_plate(&self.license_plate),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            vehicle_type: self.vehicle_type.trim().to_string(),
            soat_expiry: ExpiryDate::parse(&self.soat_expiry),
            rtm_expiry: ExpiryDate::parse(&self.rtm_expiry),
            operating_card_expiry: ExpiryDate::parse(&self.operating_card_expiry),
            rcc_policy_expiry: ExpiryDate::parse(&self.rcc_policy_expiry),
            rce_policy_expiry: ExpiryDate::parse(&self.rce_policy_expiry),
        }
    }
}

// Request para actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub brand: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub model: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub vehicle_type: Option<String>,
    #[validate(custom = "validate_date_field")]
    pub soat_expiry: Option<String>,
    #[validate(custom = "validate_date_field")]
    pub rtm_expiry: Option<String>,
    #[validate(custom = "validate_date_field")]
    pub operating_card_expiry: Option<String>,
    #[validate(custom = "validate_date_field")]
    pub rcc_policy_expiry: Option<String>,
    #[validate(custom = "validate_date_field")]
    pub rce_policy_expiry: Option<String>,
}

impl UpdateVehicleRequest {
    pub fn apply(self, vehicle: &mut Vehicle) {
        if let Some(plate) = self.license_plate {
            vehicle.license_plate = normalize_plate(&plate);
        }
        if let Some(brand) = self.brand {
            vehicle.brand = brand.trim().to_string();
        }
        if let Some(model) = self.model {
            vehicle.model = model.trim().to_string();
        }
        if let Some(vehicle_type) = self.vehicle_type {
            vehicle.vehicle_type = vehicle_type.trim().to_string();
        }
        if let Some(date) = self.soat_expiry {
            vehicle.soat_expiry = ExpiryDate::parse(&date);
        }
        if let Some(date) = self.rtm_expiry {
            vehicle.rtm_expiry = ExpiryDate::parse(&date);
        }
        if let Some(date) = self.operating_card_expiry {
            vehicle.operating_card_expiry = ExpiryDate::parse(&date);
        }
        if let Some(date) = self.rcc_policy_expiry {
            vehicle.rcc_policy_expiry = ExpiryDate::parse(&date);
        }
        if let Some(date) = self.rce_policy_expiry {
            vehicle.rce_policy_expiry = ExpiryDate::parse(&date);
        }
    }
}

// Response de vehículo con su estado de documentación
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub status: OverallStatus,
}

#[derive(Debug, Serialize)]
pub struct VehicleDocumentsResponse {
    pub vehicle_id: String,
    pub license_plate: String,
    pub status: OverallStatus,
    pub documents: Vec<DocumentReport>,
}
