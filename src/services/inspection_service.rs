//! Máquina de estados de la inspección
//!
//! `Select → Inspect → Signature → Success`. La única transición hacia atrás es
//! `Signature → Inspect`; `reset` vuelve a `Select` desde cualquier paso y
//! descarta el estado no confirmado.
//!
//! `InspectionSession` es estado privado de un inspector y no toca el
//! almacenamiento. `InspectionService` resuelve las referencias contra el
//! `FleetStore`, evalúa la elegibilidad y agrega el reporte al finalizar.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{info, warn};

use crate::config::catalog::CatalogConfig;
use crate::models::{Attachment, CheckItem, Driver, InspectionType, ItemState, Report, ReportItem, User, Vehicle};
use crate::repositories::{CheckItemRepository, DriverRepository, FleetStore, ReportRepository, VehicleRepository};
use crate::services::catalog_service::CatalogService;
use crate::services::eligibility_service::{EligibilityEvaluator, EligibilityVerdict};
use crate::services::report_assembler::ReportAssembler;
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStep {
    Select,
    Inspect,
    Signature,
    Success,
}

impl fmt::Display for InspectionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InspectionStep::Select => "select",
            InspectionStep::Inspect => "inspect",
            InspectionStep::Signature => "signature",
            InspectionStep::Success => "success",
        };
        f.write_str(name)
    }
}

/// Errores corregibles por el usuario; la sesión queda en el mismo paso
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InspectionError {
    #[error("Cannot {action} during the '{step}' step")]
    InvalidTransition { step: InspectionStep, action: &'static str },

    #[error("A vehicle and a driver must be selected")]
    MissingSelection,

    #[error("{count} checklist item(s) incomplete; first incomplete item is '{first_item_id}'")]
    IncompleteChecklist { first_item_id: String, count: usize },

    #[error("Inspector and driver signatures are both required")]
    MissingSignatures,

    #[error("Item '{0}' is not part of this inspection")]
    UnknownItem(String),

    #[error("No attachment at index {index}")]
    AttachmentNotFound { index: usize },
}

/// Alcance de "marcar todo bien"
#[derive(Debug, Clone, PartialEq)]
pub enum MarkGoodScope {
    All,
    Module(String),
    Items(Vec<String>),
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectionSession {
    pub step: InspectionStep,
    pub inspection_type: InspectionType,
    pub vehicle_id: Option<String>,
    pub driver_id: Option<String>,
    /// Veredicto calculado al seleccionar; solo informativo
    pub preview: Option<EligibilityVerdict>,
    pub items: Vec<ReportItem>,
    pub general_attachments: Vec<Attachment>,
    pub inspector_signature: String,
    pub driver_signature: String,
    pub report_id: Option<String>,
    #[serde(skip)]
    item_modules: HashMap<String, String>,
}

impl InspectionSession {
    pub fn new(inspection_type: InspectionType) -> Self {
        Self {
            step: InspectionStep::Select,
            inspection_type,
            vehicle_id: None,
            driver_id: None,
            preview: None,
            items: Vec::new(),
            general_attachments: Vec::new(),
            inspector_signature: String::new(),
            driver_signature: String::new(),
            report_id: None,
            item_modules: HashMap::new(),
        }
    }

    fn require_step(&self, expected: InspectionStep, action: &'static str) -> Result<(), InspectionError> {
        if self.step != expected {
            return Err(InspectionError::InvalidTransition {
                step: self.step,
                action,
            });
        }
        Ok(())
    }

    /// Registra la selección. Un identificador vacío deja el campo sin elegir.
    pub fn select(&mut self, vehicle_id: &str, driver_id: &str) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Select, "select a vehicle and driver")?;
        self.vehicle_id = non_empty(vehicle_id);
        self.driver_id = non_empty(driver_id);
        self.preview = None;
        Ok(())
    }

    pub fn selection(&self) -> Result<(&str, &str), InspectionError> {
        match (&self.vehicle_id, &self.driver_id) {
            (Some(vehicle), Some(driver)) => Ok((vehicle, driver)),
            _ => Err(InspectionError::MissingSelection),
        }
    }

    /// Avanza a `Inspect` creando un `ReportItem` vacío por ítem aplicable
    pub fn start(&mut self, applicable: &[CheckItem]) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Select, "start the inspection")?;
        self.selection()?;

        self.items = applicable.iter().map(|item| ReportItem::new(item.id.clone())).collect();
        self.item_modules = applicable
            .iter()
            .map(|item| (item.id.clone(), item.module.clone()))
            .collect();
        self.step = InspectionStep::Inspect;
        Ok(())
    }

    fn item_mut(&mut self, item_id: &str) -> Result<&mut ReportItem, InspectionError> {
        self.items
            .iter_mut()
            .find(|item| item.item_id == item_id)
            .ok_or_else(|| InspectionError::UnknownItem(item_id.to_string()))
    }

    pub fn set_state(&mut self, item_id: &str, state: ItemState) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Inspect, "change an item state")?;
        self.item_mut(item_id)?.state = Some(state);
        Ok(())
    }

    pub fn set_observation(&mut self, item_id: &str, text: &str) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Inspect, "change an observation")?;
        self.item_mut(item_id)?.observation = text.to_string();
        Ok(())
    }

    pub fn add_attachment(&mut self, item_id: &str, attachment: Attachment) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Inspect, "attach a file")?;
        self.item_mut(item_id)?.attachments.push(attachment);
        Ok(())
    }

    pub fn remove_attachment(&mut self, item_id: &str, index: usize) -> Result<Attachment, InspectionError> {
        self.require_step(InspectionStep::Inspect, "remove an attachment")?;
        let item = self.item_mut(item_id)?;
        if index >= item.attachments.len() {
            return Err(InspectionError::AttachmentNotFound { index });
        }
        Ok(item.attachments.remove(index))
    }

    pub fn add_general_attachment(&mut self, attachment: Attachment) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Inspect, "attach a file")?;
        self.general_attachments.push(attachment);
        Ok(())
    }

    pub fn remove_general_attachment(&mut self, index: usize) -> Result<Attachment, InspectionError> {
        self.require_step(InspectionStep::Inspect, "remove an attachment")?;
        if index >= self.general_attachments.len() {
            return Err(InspectionError::AttachmentNotFound { index });
        }
        Ok(self.general_attachments.remove(index))
    }

    /// Deja en "bien" y sin observación cada ítem del alcance. Devuelve cuántos
    /// ítems se marcaron.
    pub fn mark_good(&mut self, scope: &MarkGoodScope) -> Result<usize, InspectionError> {
        self.require_step(InspectionStep::Inspect, "mark items as good")?;

        let targets: Vec<String> = match scope {
            MarkGoodScope::All => self.items.iter().map(|item| item.item_id.clone()).collect(),
            MarkGoodScope::Module(module) => self
                .items
                .iter()
                .filter(|item| self.item_modules.get(&item.item_id) == Some(module))
                .map(|item| item.item_id.clone())
                .collect(),
            MarkGoodScope::Items(ids) => {
                if let Some(unknown) = ids.iter().find(|id| !self.items.iter().any(|item| &item.item_id == *id)) {
                    return Err(InspectionError::UnknownItem(unknown.clone()));
                }
                ids.clone()
            }
        };

        let mut marked = 0;
        for item in self.items.iter_mut().filter(|item| targets.contains(&item.item_id)) {
            item.state = Some(ItemState::Good);
            item.observation.clear();
            marked += 1;
        }
        Ok(marked)
    }

    pub fn mark_all_good(&mut self) -> Result<usize, InspectionError> {
        self.mark_good(&MarkGoodScope::All)
    }

    pub fn mark_module_good(&mut self, module: &str) -> Result<usize, InspectionError> {
        self.mark_good(&MarkGoodScope::Module(module.to_string()))
    }

    pub fn mark_items_good(&mut self, item_ids: &[String]) -> Result<usize, InspectionError> {
        self.mark_good(&MarkGoodScope::Items(item_ids.to_vec()))
    }

    /// Primer ítem incompleto y total de incompletos
    pub fn first_incomplete(&self) -> Option<(&str, usize)> {
        let mut incomplete = self.items.iter().filter(|item| !item.is_complete());
        let first = incomplete.next()?;
        Some((first.item_id.as_str(), 1 + incomplete.count()))
    }

    fn ensure_complete(&self) -> Result<(), InspectionError> {
        match self.first_incomplete() {
            Some((first_item_id, count)) => Err(InspectionError::IncompleteChecklist {
                first_item_id: first_item_id.to_string(),
                count,
            }),
            None => Ok(()),
        }
    }

    pub fn proceed_to_signature(&mut self) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Inspect, "continue to signatures")?;
        self.ensure_complete()?;
        self.step = InspectionStep::Signature;
        Ok(())
    }

    pub fn back_to_inspect(&mut self) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Signature, "go back to the checklist")?;
        self.step = InspectionStep::Inspect;
        Ok(())
    }

    pub fn set_inspector_signature(&mut self, signature: &str) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Signature, "sign")?;
        self.inspector_signature = signature.to_string();
        Ok(())
    }

    pub fn set_driver_signature(&mut self, signature: &str) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Signature, "sign")?;
        self.driver_signature = signature.to_string();
        Ok(())
    }

    /// Revalida todo lo necesario para finalizar sin modificar la sesión
    pub fn ensure_ready_to_finalize(&self) -> Result<(), InspectionError> {
        self.require_step(InspectionStep::Signature, "finalize")?;
        self.selection()?;
        self.ensure_complete()?;
        if self.inspector_signature.trim().is_empty() || self.driver_signature.trim().is_empty() {
            return Err(InspectionError::MissingSignatures);
        }
        Ok(())
    }

    /// Marca la sesión como terminada una vez guardado el reporte
    pub fn complete(&mut self, report_id: &str) -> Result<(), InspectionError> {
        self.ensure_ready_to_finalize()?;
        self.report_id = Some(report_id.to_string());
        self.step = InspectionStep::Success;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.inspection_type);
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Sesiones en curso, una por inspector. El mapa solo se bloquea para
/// obtener la entrada; cada sesión tiene su propio `Mutex`, así que un
/// inspector ocupado no frena a los demás.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<InspectionSession>>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    async fn entry(&self, user_id: &str, inspection_type: InspectionType) -> Arc<Mutex<InspectionSession>> {
        if let Some(session) = self.sessions.read().await.get(user_id) {
            return session.clone();
        }
        self.sessions
            .write()
            .await
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(InspectionSession::new(inspection_type))))
            .clone()
    }

    /// Copia de la sesión del usuario (una vacía si no tiene)
    pub async fn view(&self, user_id: &str, inspection_type: InspectionType) -> InspectionSession {
        let entry = self.sessions.read().await.get(user_id).cloned();
        match entry {
            Some(session) => {
                let session = session.lock().await;
                if session.inspection_type == inspection_type {
                    session.clone()
                } else {
                    InspectionSession::new(inspection_type)
                }
            }
            None => InspectionSession::new(inspection_type),
        }
    }

    /// Acceso exclusivo a la sesión del usuario, creada si no existe. Si el
    /// tipo de chequeo del rol cambió, la sesión anterior se descarta.
    pub async fn lock(&self, user_id: &str, inspection_type: InspectionType) -> SessionGuard {
        let mut session = self.entry(user_id, inspection_type).await.lock_owned().await;
        if session.inspection_type != inspection_type {
            *session = InspectionSession::new(inspection_type);
        }
        SessionGuard { session }
    }

    pub async fn remove(&self, user_id: &str) {
        self.sessions.write().await.remove(user_id);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Sesión de un inspector bloqueada mientras dura una operación
pub struct SessionGuard {
    session: OwnedMutexGuard<InspectionSession>,
}

impl Deref for SessionGuard {
    type Target = InspectionSession;

    fn deref(&self) -> &InspectionSession {
        &self.session
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut InspectionSession {
        &mut self.session
    }
}

/// Vehículo y conductor resueltos al seleccionar, con su veredicto
#[derive(Debug, Clone)]
pub struct Selection {
    pub vehicle: Vehicle,
    pub driver: Driver,
    pub verdict: EligibilityVerdict,
}

/// Operaciones de la inspección que necesitan el almacenamiento
#[derive(Clone)]
pub struct InspectionService {
    store: FleetStore,
    evaluator: EligibilityEvaluator,
    catalog_config: Arc<CatalogConfig>,
}

impl InspectionService {
    pub fn new(store: FleetStore, evaluator: EligibilityEvaluator, catalog_config: Arc<CatalogConfig>) -> Self {
        Self {
            store,
            evaluator,
            catalog_config,
        }
    }

    /// Selecciona vehículo y conductor y devuelve la vista previa de elegibilidad
    pub async fn select(
        &self,
        session: &mut InspectionSession,
        vehicle_id: &str,
        driver_id: &str,
        today: NaiveDate,
    ) -> AppResult<Selection> {
        let vehicle = VehicleRepository::new(&self.store)
            .find_by_id(vehicle_id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;
        let driver = DriverRepository::new(&self.store)
            .find_by_id(driver_id)
            .await
            .ok_or_else(|| not_found_error("Driver", driver_id))?;

        session.select(&vehicle.id, &driver.id)?;

        let verdict = self.evaluator.evaluate(&vehicle, &driver, today);
        if verdict.blocked {
            warn!(
                "🚫 Vehicle {} with driver {} blocked: {}",
                vehicle.license_plate,
                driver.full_name,
                verdict.reasons.join(", ")
            );
        }
        session.preview = Some(verdict.clone());
        Ok(Selection { vehicle, driver, verdict })
    }

    pub async fn start(&self, session: &mut InspectionSession, inspector: &User) -> AppResult<usize> {
        let catalog = CheckItemRepository::new(&self.store).list().await;
        let applicable = CatalogService::applicable_items(&catalog, session.inspection_type, &self.catalog_config);
        session.start(&applicable)?;

        info!(
            "📋 Inspection started by {} ({}) with {} items",
            inspector.email,
            session.inspection_type.as_str(),
            applicable.len()
        );
        Ok(applicable.len())
    }

    /// Valida, evalúa, arma y agrega el reporte. Si algo falla la colección de
    /// reportes y la sesión quedan como estaban.
    pub async fn finalize(&self, session: &mut InspectionSession, inspector: &User, today: NaiveDate) -> AppResult<Report> {
        session.ensure_ready_to_finalize()?;
        let (vehicle_id, driver_id) = session.selection()?;

        let vehicle = VehicleRepository::new(&self.store)
            .find_by_id(vehicle_id)
            .await
            .ok_or_else(|| AppError::Integrity(format!("Vehicle '{}' no longer exists", vehicle_id)))?;
        let driver = DriverRepository::new(&self.store)
            .find_by_id(driver_id)
            .await
            .ok_or_else(|| AppError::Integrity(format!("Driver '{}' no longer exists", driver_id)))?;

        let catalog = CheckItemRepository::new(&self.store).list().await;
        if let Some(missing) = session
            .items
            .iter()
            .find(|item| !catalog.iter().any(|c| c.id == item.item_id))
        {
            return Err(AppError::Integrity(format!(
                "Check item '{}' no longer exists",
                missing.item_id
            )));
        }

        let verdict = self.evaluator.evaluate(&vehicle, &driver, today);
        let report = ReportAssembler::assemble(session, &vehicle, &driver, inspector, &verdict);
        let report = ReportRepository::new(&self.store).append(report).await?;
        session.complete(&report.id)?;

        if report.blocked {
            warn!(
                "🚫 Report {} recorded for blocked vehicle {}: {}",
                report.id,
                report.vehicle.license_plate,
                report.block_reason.as_deref().unwrap_or_default()
            );
        }
        info!(
            "✅ Report {} finalized by {} for vehicle {}",
            report.id, inspector.email, report.vehicle.license_plate
        );
        Ok(report)
    }
}
