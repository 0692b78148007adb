//! Filtro del catálogo de ítems
//!
//! Selecciona los ítems que aplican a un tipo de chequeo y los agrupa por
//! módulo y, opcionalmente, por submódulo según `CatalogConfig`.

use serde::Serialize;
use std::collections::HashSet;

use crate::config::catalog::CatalogConfig;
use crate::models::{CheckItem, InspectionType};

/// Nombre del grupo que recoge los ítems sin submódulo
pub const DEFAULT_SUBMODULE: &str = "Todos";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmoduleGroup {
    pub name: String,
    pub items: Vec<CheckItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleGroup {
    pub module: String,
    pub items: Vec<CheckItem>,
    pub submodules: Vec<SubmoduleGroup>,
}

pub struct CatalogService;

impl CatalogService {
    /// Ítems aplicables en el orden del catálogo
    pub fn applicable_items(
        catalog: &[CheckItem],
        inspection_type: InspectionType,
        config: &CatalogConfig,
    ) -> Vec<CheckItem> {
        catalog
            .iter()
            .filter(|item| Self::applies(item, inspection_type, config))
            .cloned()
            .collect()
    }

    /// Ítems aplicables agrupados por módulo. Los módulos aparecen en el orden
    /// de su primer ítem en el catálogo.
    pub fn select_applicable(
        catalog: &[CheckItem],
        inspection_type: InspectionType,
        config: &CatalogConfig,
    ) -> Vec<ModuleGroup> {
        let mut groups: Vec<ModuleGroup> = Vec::new();

        for item in Self::applicable_items(catalog, inspection_type, config) {
            match groups.iter_mut().find(|g| g.module == item.module) {
                Some(group) => group.items.push(item),
                None => groups.push(ModuleGroup {
                    module: item.module.clone(),
                    items: vec![item],
                    submodules: Vec::new(),
                }),
            }
        }

        for group in &mut groups {
            group.submodules = Self::group_submodules(&group.module, &group.items, config);
        }
        groups
    }

    /// Parte los ítems de un módulo según el mapa de submódulos. Los ítems que
    /// ningún submódulo cubre van al grupo "Todos".
    pub fn group_submodules(module: &str, items: &[CheckItem], config: &CatalogConfig) -> Vec<SubmoduleGroup> {
        let definitions = config.submodules.get(module).map(Vec::as_slice).unwrap_or(&[]);
        let mut covered: HashSet<&str> = HashSet::new();
        let mut groups = Vec::new();

        for definition in definitions {
            let members: Vec<CheckItem> = items
                .iter()
                .filter(|item| definition.item_ids.iter().any(|id| id == &item.id))
                .cloned()
                .collect();
            if members.is_empty() {
                continue;
            }
            covered.extend(definition.item_ids.iter().map(String::as_str));
            groups.push(SubmoduleGroup {
                name: definition.name.clone(),
                items: members,
            });
        }

        let rest: Vec<CheckItem> = items
            .iter()
            .filter(|item| !covered.contains(item.id.as_str()))
            .cloned()
            .collect();
        if !rest.is_empty() {
            groups.push(SubmoduleGroup {
                name: DEFAULT_SUBMODULE.to_string(),
                items: rest,
            });
        }

        groups
    }

    fn applies(item: &CheckItem, inspection_type: InspectionType, config: &CatalogConfig) -> bool {
        match inspection_type {
            InspectionType::Full => true,
            InspectionType::Simplified => {
                if !item.applies_to_simplified {
                    return false;
                }
                let name = item.name.to_lowercase();
                !config
                    .simplified_name_exclusions
                    .iter()
                    .any(|excluded| name.contains(excluded.as_str()))
            }
        }
    }
}
