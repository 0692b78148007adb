//! Modelo de CheckItem
//!
//! Un punto de inspección del catálogo. Los reportes solo lo referencian por id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckItem {
    pub id: String,
    pub name: String,
    /// Clave de agrupación, p. ej. "5.2 - Llantas, Frenos, Luces y Fugas"
    pub module: String,
    /// Criterio de aceptación mostrado al inspector
    pub criterion: String,
    /// Aplica al chequeo simplificado (Operador Isla)
    pub applies_to_simplified: bool,
}
