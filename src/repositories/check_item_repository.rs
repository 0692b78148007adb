use std::sync::Arc;

use crate::models::CheckItem;
use crate::repositories::store::{Collection, FleetStore};
use crate::utils::errors::AppResult;

const RESOURCE: &str = "CheckItem";

pub struct CheckItemRepository {
    items: Arc<Collection<CheckItem>>,
}

impl CheckItemRepository {
    pub fn new(store: &FleetStore) -> Self {
        Self {
            items: store.check_items.clone(),
        }
    }

    /// El id es la única clave única del catálogo
    pub async fn create(&self, item: CheckItem) -> AppResult<CheckItem> {
        self.items.insert_unique(RESOURCE, item, |_, _| None).await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<CheckItem> {
        self.items.find(id).await
    }

    /// Catálogo completo en su orden de presentación
    pub async fn list(&self) -> Vec<CheckItem> {
        self.items.list().await
    }

    pub async fn update<F>(&self, id: &str, apply: F) -> AppResult<CheckItem>
    where
        F: FnOnce(&mut CheckItem),
    {
        self.items.update(RESOURCE, id, apply).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<CheckItem> {
        self.items.remove(RESOURCE, id).await
    }
}
