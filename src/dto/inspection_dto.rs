use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Attachment, ItemState};
use crate::services::eligibility_service::{DocumentReport, EligibilityVerdict};
use crate::services::inspection_service::{InspectionSession, MarkGoodScope};
use crate::utils::validation::validate_not_empty;

#[derive(Debug, Deserialize, Validate)]
pub struct SelectRequest {
    #[validate(custom = "validate_not_empty")]
    pub vehicle_id: String,
    #[validate(custom = "validate_not_empty")]
    pub driver_id: String,
}

// Vista previa de elegibilidad al seleccionar vehículo y conductor
#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub verdict: EligibilityVerdict,
    pub block_reason: Option<String>,
    pub vehicle_documents: Vec<DocumentReport>,
    pub driver_documents: Vec<DocumentReport>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub state: Option<ItemState>,
    pub observation: Option<String>,
}

// Archivo ya capturado; `data_ref` es opaco
#[derive(Debug, Deserialize, Validate)]
pub struct AttachmentRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: String,
    #[validate(custom = "validate_not_empty")]
    pub data_ref: String,
    #[validate(custom = "validate_not_empty")]
    pub mime_type: String,
}

impl From<AttachmentRequest> for Attachment {
    fn from(request: AttachmentRequest) -> Self {
        Attachment {
            name: request.name,
            data_ref: request.data_ref,
            mime_type: request.mime_type,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum MarkGoodRequest {
    All,
    Module { module: String },
    Items { item_ids: Vec<String> },
}

impl From<MarkGoodRequest> for MarkGoodScope {
    fn from(request: MarkGoodRequest) -> Self {
        match request {
            MarkGoodRequest::All => MarkGoodScope::All,
            MarkGoodRequest::Module { module } => MarkGoodScope::Module(module),
            MarkGoodRequest::Items { item_ids } => MarkGoodScope::Items(item_ids),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkGoodResponse {
    pub marked: usize,
}

#[derive(Debug, Deserialize)]
pub struct SignaturesRequest {
    pub inspector: Option<String>,
    pub driver: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IncompleteSummary {
    pub first_item_id: String,
    pub count: usize,
}

// Estado de la sesión de inspección del usuario
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: InspectionSession,
    pub incomplete: Option<IncompleteSummary>,
}

impl From<InspectionSession> for SessionResponse {
    fn from(session: InspectionSession) -> Self {
        let incomplete = session.first_incomplete().map(|(first_item_id, count)| IncompleteSummary {
            first_item_id: first_item_id.to_string(),
            count,
        });
        Self { session, incomplete }
    }
}
