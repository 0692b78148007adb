use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Driver, ExpiryDate};
use crate::services::eligibility_service::OverallStatus;
use crate::utils::validation::{validate_date_field, validate_national_id, validate_not_empty, validate_phone};

// Request para crear un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(custom = "validate_not_empty")]
    pub full_name: String,
    #[validate(custom = "validate_national_id")]
    pub national_id: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom = "validate_date_field")]
    pub license_expiry: String,
}

impl CreateDriverRequest {
    pub fn into_driver(self, id: String) -> Driver {
        Driver {
            id,
            full_name: self.full_name.trim().to_string(),
            national_id: self.national_id.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            license_expiry: ExpiryDate::parse(&self.license_expiry),
        }
    }
}

// Request para actualizar un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(custom = "validate_not_empty")]
    pub full_name: Option<String>,
    #[validate(custom = "validate_national_id")]
    pub national_id: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_date_field")]
    pub license_expiry: Option<String>,
}

impl UpdateDriverRequest {
    pub fn apply(self, driver: &mut Driver) {
        if let Some(full_name) = self.full_name {
            driver.full_name = full_name.trim().to_string();
        }
        if let Some(national_id) = self.national_id {
            driver.national_id = national_id.trim().to_string();
        }
        if let Some(phone) = self.phone {
            driver.phone = phone.trim().to_string();
        }
        if let Some(email) = self.email {
            driver.email = email.trim().to_string();
        }
        if let Some(date) = self.license_expiry {
            driver.license_expiry = ExpiryDate::parse(&date);
        }
    }
}

// Response de conductor con el estado de su licencia
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    #[serde(flatten)]
    pub driver: Driver,
    pub status: OverallStatus,
}
