use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::catalog::CatalogConfig;
use crate::dto::check_item_dto::{ApplicableItemsResponse, CreateCheckItemRequest, UpdateCheckItemRequest};
use crate::dto::{ApiResponse, SearchQuery};
use crate::models::{CheckItem, User};
use crate::repositories::CheckItemRepository;
use crate::services::authorization_service::AuthorizationService;
use crate::services::catalog_service::CatalogService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use std::sync::Arc;

pub struct CheckItemController {
    repository: CheckItemRepository,
    catalog_config: Arc<CatalogConfig>,
}

impl CheckItemController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: CheckItemRepository::new(&state.store),
            catalog_config: state.catalog_config.clone(),
        }
    }

    pub async fn list(&self, query: &SearchQuery) -> Vec<CheckItem> {
        self.repository
            .list()
            .await
            .into_iter()
            .filter(|i| {
                query.matches(&[
                    i.name.as_str(),
                    i.module.as_str(),
                    i.criterion.as_str(),
                ])
            })
            .collect()
    }

    /// Checklist del tipo de chequeo del usuario, agrupado por módulo y submódulo
    pub async fn applicable(&self, user: &User) -> Result<ApplicableItemsResponse, AppError> {
        let inspection_type = AuthorizationService::require_inspector(user)?;
        let catalog = self.repository.list().await;
        let modules = CatalogService::select_applicable(&catalog, inspection_type, &self.catalog_config);

        Ok(ApplicableItemsResponse {
            inspection_type,
            total_items: modules.iter().map(|m| m.items.len()).sum(),
            modules,
        })
    }

    pub async fn create(
        &self,
        user: &User,
        request: CreateCheckItemRequest,
    ) -> Result<ApiResponse<CheckItem>, AppError> {
        AuthorizationService::require_item_manager(user)?;
        request.validate()?;

        let item = self
            .repository
            .create(request.into_check_item(Uuid::new_v4().to_string()))
            .await?;
        info!("📝 Check item {} created by {}", item.id, user.email);
        Ok(ApiResponse::success_with_message(item, "Ítem creado exitosamente"))
    }

    pub async fn update(
        &self,
        user: &User,
        id: &str,
        request: UpdateCheckItemRequest,
    ) -> Result<ApiResponse<CheckItem>, AppError> {
        AuthorizationService::require_item_manager(user)?;
        request.validate()?;

        let item = self.repository.update(id, |i| request.apply(i)).await?;
        Ok(ApiResponse::success_with_message(item, "Ítem actualizado exitosamente"))
    }

    pub async fn delete(&self, user: &User, id: &str) -> Result<ApiResponse<()>, AppError> {
        AuthorizationService::require_item_manager(user)?;
        self.repository.delete(id).await?;
        Ok(ApiResponse::message("Ítem eliminado exitosamente"))
    }
}
