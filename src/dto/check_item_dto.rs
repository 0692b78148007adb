use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::CheckItem;
use crate::services::catalog_service::ModuleGroup;
use crate::models::InspectionType;
use crate::utils::validation::validate_not_empty;

// Request para crear un ítem de inspección; el id se genera si no viene
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCheckItemRequest {
    #[validate(custom = "validate_not_empty")]
    pub id: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub name: String,
    #[validate(custom = "validate_not_empty")]
    pub module: String,
    #[serde(default)]
    pub criterion: String,
    #[serde(default)]
    pub applies_to_simplified: bool,
}

impl CreateCheckItemRequest {
    pub fn into_check_item(self, generated_id: String) -> CheckItem {
        CheckItem {
            id: self.id.map(|id| id.trim().to_string()).unwrap_or(generated_id),
            name: self.name.trim().to_string(),
            module: self.module.trim().to_string(),
            criterion: self.criterion.trim().to_string(),
            applies_to_simplified: self.applies_to_simplified,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCheckItemRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub module: Option<String>,
    pub criterion: Option<String>,
    pub applies_to_simplified: Option<bool>,
}

impl UpdateCheckItemRequest {
    pub fn apply(self, item: &mut CheckItem) {
        if let Some(name) = self.name {
            item.name = name.trim().to_string();
        }
        if let Some(module) = self.module {
            item.module = module.trim().to_string();
        }
        if let Some(criterion) = self.criterion {
            item.criterion = criterion.trim().to_string();
        }
        if let Some(flag) = self.applies_to_simplified {
            item.applies_to_simplified = flag;
        }
    }
}

// Checklist aplicable al rol del usuario
#[derive(Debug, Serialize)]
pub struct ApplicableItemsResponse {
    pub inspection_type: InspectionType,
    pub total_items: usize,
    pub modules: Vec<ModuleGroup>,
}
