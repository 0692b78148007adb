use std::sync::Arc;

use crate::models::Driver;
use crate::repositories::store::{Collection, FleetStore};
use crate::utils::errors::AppResult;

const RESOURCE: &str = "Driver";

fn national_id_conflict(existing: &Driver, candidate: &Driver) -> Option<(&'static str, String)> {
    (existing.national_id.trim() == candidate.national_id.trim())
        .then(|| ("national_id", candidate.national_id.clone()))
}

pub struct DriverRepository {
    drivers: Arc<Collection<Driver>>,
}

impl DriverRepository {
    pub fn new(store: &FleetStore) -> Self {
        Self {
            drivers: store.drivers.clone(),
        }
    }

    pub async fn create(&self, driver: Driver) -> AppResult<Driver> {
        self.drivers.insert_unique(RESOURCE, driver, national_id_conflict).await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Driver> {
        self.drivers.find(id).await
    }

    pub async fn list(&self) -> Vec<Driver> {
        self.drivers.list().await
    }

    pub async fn update<F>(&self, id: &str, apply: F) -> AppResult<Driver>
    where
        F: FnOnce(&mut Driver),
    {
        self.drivers.update_unique(RESOURCE, id, apply, national_id_conflict).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Driver> {
        self.drivers.remove(RESOURCE, id).await
    }
}
