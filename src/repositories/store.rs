//! Almacenamiento en memoria
//!
//! Cada colección guarda sus entidades en orden de inserción detrás de un
//! `RwLock`. `FleetStore` agrupa todas las colecciones y se pasa explícitamente
//! a los repositorios; no hay estado global.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{CheckItem, Driver, Report, User, Vehicle};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

/// Entidad con identificador único dentro de su colección
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Vehicle {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Driver {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for CheckItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Report {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub struct Collection<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Identified + Clone> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub async fn list(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn find(&self, id: &str) -> Option<T> {
        self.items.read().await.iter().find(|item| item.id() == id).cloned()
    }

    pub async fn find_by<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.read().await.iter().find(|item| predicate(item)).cloned()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Ejecuta `f` con acceso exclusivo a la colección completa
    pub async fn modify<R, F>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> AppResult<R>,
    {
        let mut items = self.items.write().await;
        f(&mut items)
    }

    /// Aplica `patch` a la entidad `id` y devuelve la versión actualizada
    pub async fn update<F>(&self, resource: &str, id: &str, patch: F) -> AppResult<T>
    where
        F: FnOnce(&mut T),
    {
        self.update_unique(resource, id, patch, |_, _| None).await
    }

    /// Inserta `entity` si su id y los campos que revisa `conflicts` son únicos
    pub async fn insert_unique<C>(&self, resource: &str, entity: T, conflicts: C) -> AppResult<T>
    where
        C: Fn(&T, &T) -> Option<(&'static str, String)>,
    {
        self.modify(|items| {
            if items.iter().any(|existing| existing.id() == entity.id()) {
                return Err(conflict_error(resource, "id", entity.id()));
            }
            if let Some((field, value)) = items.iter().find_map(|existing| conflicts(existing, &entity)) {
                return Err(conflict_error(resource, field, &value));
            }
            items.push(entity.clone());
            Ok(entity)
        })
        .await
    }

    /// Como `update`, pero rechaza el cambio si choca con otra entidad
    pub async fn update_unique<F, C>(&self, resource: &str, id: &str, patch: F, conflicts: C) -> AppResult<T>
    where
        F: FnOnce(&mut T),
        C: Fn(&T, &T) -> Option<(&'static str, String)>,
    {
        self.modify(|items| {
            let index = items
                .iter()
                .position(|item| item.id() == id)
                .ok_or_else(|| not_found_error(resource, id))?;
            let mut updated = items[index].clone();
            patch(&mut updated);
            let conflict = items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .find_map(|(_, existing)| conflicts(existing, &updated));
            if let Some((field, value)) = conflict {
                return Err(conflict_error(resource, field, &value));
            }
            items[index] = updated.clone();
            Ok(updated)
        })
        .await
    }

    pub async fn remove(&self, resource: &str, id: &str) -> AppResult<T> {
        self.modify(|items| {
            let index = items
                .iter()
                .position(|item| item.id() == id)
                .ok_or_else(|| not_found_error(resource, id))?;
            Ok(items.remove(index))
        })
        .await
    }
}

/// Todas las colecciones del sistema
#[derive(Debug, Clone, Default)]
pub struct FleetStore {
    pub vehicles: Arc<Collection<Vehicle>>,
    pub drivers: Arc<Collection<Driver>>,
    pub check_items: Arc<Collection<CheckItem>>,
    pub users: Arc<Collection<User>>,
    pub reports: Arc<Collection<Report>>,
}

impl FleetStore {
    pub fn new(
        vehicles: Vec<Vehicle>,
        drivers: Vec<Driver>,
        check_items: Vec<CheckItem>,
        users: Vec<User>,
    ) -> Self {
        Self {
            vehicles: Arc::new(Collection::new(vehicles)),
            drivers: Arc::new(Collection::new(drivers)),
            check_items: Arc::new(Collection::new(check_items)),
            users: Arc::new(Collection::new(users)),
            reports: Arc::new(Collection::new(Vec::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    fn item(id: &str, name: &str) -> CheckItem {
        CheckItem {
            id: id.to_string(),
            name: name.to_string(),
            module: "5.1".to_string(),
            criterion: String::new(),
            applies_to_simplified: true,
        }
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let collection = Collection::new(vec![item("i1", "Placas"), item("i2", "Emblemas")]);

        let updated = collection
            .update("CheckItem", "i2", |i| i.name = "Logotipos".to_string())
            .await
            .unwrap();
        assert_eq!(updated.name, "Logotipos");

        let removed = collection.remove("CheckItem", "i1").await.unwrap();
        assert_eq!(removed.id, "i1");
        assert_eq!(collection.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_unique_rejects_duplicates() {
        let collection = Collection::new(vec![item("i1", "Placas")]);
        let same_name = |a: &CheckItem, b: &CheckItem| {
            (a.name == b.name).then(|| ("name", b.name.clone()))
        };

        let err = collection.insert_unique("CheckItem", item("i1", "Otro"), same_name).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = collection.insert_unique("CheckItem", item("i2", "Placas"), same_name).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        collection.insert_unique("CheckItem", item("i2", "Emblemas"), same_name).await.unwrap();
        assert_eq!(collection.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_unique_ignores_itself() {
        let collection = Collection::new(vec![item("i1", "Placas"), item("i2", "Emblemas")]);
        let same_name = |a: &CheckItem, b: &CheckItem| {
            (a.name == b.name).then(|| ("name", b.name.clone()))
        };

        collection
            .update_unique("CheckItem", "i1", |i| i.criterion = "Legibles".to_string(), same_name)
            .await
            .unwrap();
        let err = collection
            .update_unique("CheckItem", "i1", |i| i.name = "Emblemas".to_string(), same_name)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(collection.find("i1").await.unwrap().name, "Placas");
    }

    #[tokio::test]
    async fn test_missing_entity_is_not_found() {
        let collection: Collection<CheckItem> = Collection::new(Vec::new());
        let err = collection.remove("CheckItem", "i9").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
