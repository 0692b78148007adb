use std::sync::Arc;

use crate::models::Vehicle;
use crate::repositories::store::{Collection, FleetStore};
use crate::utils::errors::AppResult;

const RESOURCE: &str = "Vehicle";

fn plate_conflict(existing: &Vehicle, candidate: &Vehicle) -> Option<(&'static str, String)> {
    (existing.normalized_plate() == candidate.normalized_plate())
        .then(|| ("license_plate", candidate.license_plate.clone()))
}

pub struct VehicleRepository {
    vehicles: Arc<Collection<Vehicle>>,
}

impl VehicleRepository {
    pub fn new(store: &FleetStore) -> Self {
        Self {
            vehicles: store.vehicles.clone(),
        }
    }

    pub async fn create(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        self.vehicles.insert_unique(RESOURCE, vehicle, plate_conflict).await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Vehicle> {
        self.vehicles.find(id).await
    }

    pub async fn list(&self) -> Vec<Vehicle> {
        self.vehicles.list().await
    }

    pub async fn update<F>(&self, id: &str, apply: F) -> AppResult<Vehicle>
    where
        F: FnOnce(&mut Vehicle),
    {
        self.vehicles.update_unique(RESOURCE, id, apply, plate_conflict).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Vehicle> {
        self.vehicles.remove(RESOURCE, id).await
    }
}
