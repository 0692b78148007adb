//! Modelo de Report
//!
//! Un reporte es un registro de auditoría inmutable: guarda copias (no
//! referencias) del vehículo, el conductor y el inspector al momento de firmar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::driver::Driver;
use super::user::UserProfile;
use super::vehicle::Vehicle;

/// Estado de un ítem de inspección
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemState {
    #[serde(rename = "bien")]
    Good,
    #[serde(rename = "regular")]
    Fair,
    #[serde(rename = "mal")]
    Bad,
}

/// Tipo de chequeo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectionType {
    /// Chequeo completo (Mantenimiento)
    #[serde(rename = "Mantenimiento")]
    Full,
    /// Chequeo simplificado (Planillaje)
    #[serde(rename = "Planillaje")]
    Simplified,
}

impl InspectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionType::Full => "Mantenimiento",
            InspectionType::Simplified => "Planillaje",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Mantenimiento" => Some(InspectionType::Full),
            "Planillaje" => Some(InspectionType::Simplified),
            _ => None,
        }
    }
}

/// Archivo adjunto; `data_ref` es opaco (data URL, ruta, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub data_ref: String,
    pub mime_type: String,
}

/// Resultado de un ítem del checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub item_id: String,
    pub state: Option<ItemState>,
    pub observation: String,
    pub attachments: Vec<Attachment>,
}

impl ReportItem {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            state: None,
            observation: String::new(),
            attachments: Vec::new(),
        }
    }

    /// Completo: tiene estado y, si no es "bien", una observación no vacía
    pub fn is_complete(&self) -> bool {
        match self.state {
            None => false,
            Some(ItemState::Good) => true,
            Some(ItemState::Fair) | Some(ItemState::Bad) => !self.observation.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub vehicle: Vehicle,
    pub driver: Driver,
    pub inspector: UserProfile,
    pub inspection_type: InspectionType,
    pub items: Vec<ReportItem>,
    pub general_attachments: Vec<Attachment>,
    pub inspector_signature: String,
    pub driver_signature: String,
    /// Documentación vencida al momento de firmar
    pub blocked: bool,
    pub block_reason: Option<String>,
}
