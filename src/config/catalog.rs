//! Configuración del catálogo de ítems
//!
//! Submódulos y exclusiones por nombre son datos de configuración. El mapa de
//! submódulos se carga desde un JSON con la forma:
//!
//! ```json
//! { "5.2 - Llantas, Frenos, Luces y Fugas": [ { "name": "Llantas", "item_ids": ["i27"] } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::utils::errors::AppError;

/// Submódulo: nombre y conjunto de ítems que agrupa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmoduleDefinition {
    pub name: String,
    pub item_ids: Vec<String>,
}

/// Módulo → submódulos, en el orden de presentación
pub type SubmoduleMap = HashMap<String, Vec<SubmoduleDefinition>>;

#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub submodules: SubmoduleMap,
    /// Subcadenas (sin distinguir mayúsculas) que excluyen ítems del chequeo simplificado
    pub simplified_name_exclusions: Vec<String>,
}

impl CatalogConfig {
    pub fn new(submodules: SubmoduleMap, simplified_name_exclusions: Vec<String>) -> Self {
        Self {
            submodules,
            simplified_name_exclusions: simplified_name_exclusions
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Carga el mapa de submódulos desde un archivo JSON
    pub fn load(path: Option<&str>, simplified_name_exclusions: Vec<String>) -> Result<Self, AppError> {
        let submodules = match path {
            Some(path) => load_submodules(Path::new(path))?,
            None => SubmoduleMap::new(),
        };
        Ok(Self::new(submodules, simplified_name_exclusions))
    }
}

fn load_submodules(path: &Path) -> Result<SubmoduleMap, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Internal(format!("Cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Internal(format!("Invalid submodule map {}: {}", path.display(), e)))
}
