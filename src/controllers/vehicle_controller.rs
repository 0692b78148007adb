use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDocumentsResponse, VehicleResponse,
};
use crate::dto::{ApiResponse, SearchQuery};
use crate::models::{User, Vehicle};
use crate::repositories::VehicleRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::services::eligibility_service::EligibilityEvaluator;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
    evaluator: EligibilityEvaluator,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: VehicleRepository::new(&state.store),
            evaluator: state.evaluator(),
        }
    }

    fn to_response(&self, vehicle: Vehicle, today: NaiveDate) -> VehicleResponse {
        VehicleResponse {
            status: self.evaluator.vehicle_status(&vehicle, today),
            vehicle,
        }
    }

    /// Cualquier usuario autenticado puede listar (los inspectores los seleccionan)
    pub async fn list(&self, query: &SearchQuery, today: NaiveDate) -> Vec<VehicleResponse> {
        self.repository
            .list()
            .await
            .into_iter()
            .filter(|v| {
                query.matches(&[
                    v.license_plate.as_str(),
                    v.brand.as_str(),
                    v.model.as_str(),
                    v.vehicle_type.as_str(),
                ])
            })
            .map(|v| self.to_response(v, today))
            .collect()
    }

    pub async fn create(
        &self,
        user: &User,
        request: CreateVehicleRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        AuthorizationService::require_catalog_manager(user)?;
        request.validate()?;

        let vehicle = self
            .repository
            .create(request.into_vehicle(Uuid::new_v4().to_string()))
            .await?;
        info!("🚚 Vehicle {} created by {}", vehicle.license_plate, user.email);

        Ok(ApiResponse::success_with_message(
            self.to_response(vehicle, today),
            "Vehículo creado exitosamente",
        ))
    }

    pub async fn update(
        &self,
        user: &User,
        id: &str,
        request: UpdateVehicleRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        AuthorizationService::require_catalog_manager(user)?;
        request.validate()?;

        let vehicle = self.repository.update(id, |v| request.apply(v)).await?;
        Ok(ApiResponse::success_with_message(
            self.to_response(vehicle, today),
            "Vehículo actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, user: &User, id: &str) -> Result<ApiResponse<()>, AppError> {
        AuthorizationService::require_catalog_manager(user)?;
        let vehicle = self.repository.delete(id).await?;
        info!("🗑️ Vehicle {} deleted by {}", vehicle.license_plate, user.email);
        Ok(ApiResponse::message("Vehículo eliminado exitosamente"))
    }

    pub async fn documents(&self, id: &str, today: NaiveDate) -> Result<VehicleDocumentsResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(VehicleDocumentsResponse {
            status: self.evaluator.vehicle_status(&vehicle, today),
            documents: self.evaluator.vehicle_documents(&vehicle, today),
            vehicle_id: vehicle.id,
            license_plate: vehicle.license_plate,
        })
    }
}
