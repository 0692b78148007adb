use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::driver_dto::{CreateDriverRequest, DriverResponse, UpdateDriverRequest};
use crate::dto::{ApiResponse, SearchQuery};
use crate::models::{Driver, User};
use crate::repositories::DriverRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::services::eligibility_service::EligibilityEvaluator;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct DriverController {
    repository: DriverRepository,
    evaluator: EligibilityEvaluator,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: DriverRepository::new(&state.store),
            evaluator: state.evaluator(),
        }
    }

    fn to_response(&self, driver: Driver, today: NaiveDate) -> DriverResponse {
        DriverResponse {
            status: self.evaluator.driver_status(&driver, today),
            driver,
        }
    }

    /// Busca por nombre, cédula o correo
    pub async fn list(&self, query: &SearchQuery, today: NaiveDate) -> Vec<DriverResponse> {
        self.repository
            .list()
            .await
            .into_iter()
            .filter(|d| {
                query.matches(&[
                    d.full_name.as_str(),
                    d.national_id.as_str(),
                    d.email.as_str(),
                ])
            })
            .map(|d| self.to_response(d, today))
            .collect()
    }

    pub async fn create(
        &self,
        user: &User,
        request: CreateDriverRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        AuthorizationService::require_catalog_manager(user)?;
        request.validate()?;

        let driver = self
            .repository
            .create(request.into_driver(Uuid::new_v4().to_string()))
            .await?;
        info!("🧑 Driver {} created by {}", driver.full_name, user.email);

        Ok(ApiResponse::success_with_message(
            self.to_response(driver, today),
            "Conductor creado exitosamente",
        ))
    }

    pub async fn update(
        &self,
        user: &User,
        id: &str,
        request: UpdateDriverRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        AuthorizationService::require_catalog_manager(user)?;
        request.validate()?;

        let driver = self.repository.update(id, |d| request.apply(d)).await?;
        Ok(ApiResponse::success_with_message(
            self.to_response(driver, today),
            "Conductor actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, user: &User, id: &str) -> Result<ApiResponse<()>, AppError> {
        AuthorizationService::require_catalog_manager(user)?;
        let driver = self.repository.delete(id).await?;
        info!("🗑️ Driver {} deleted by {}", driver.full_name, user.email);
        Ok(ApiResponse::message("Conductor eliminado exitosamente"))
    }
}
