//! Ensamblador de reportes
//!
//! Construcción pura: copia las entidades y los ítems tal como están. No valida;
//! la máquina de estados ya lo hizo antes de llamarlo.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Driver, Report, User, UserProfile, Vehicle};
use crate::services::eligibility_service::EligibilityVerdict;
use crate::services::inspection_service::InspectionSession;

pub struct ReportAssembler;

impl ReportAssembler {
    pub fn assemble(
        session: &InspectionSession,
        vehicle: &Vehicle,
        driver: &Driver,
        inspector: &User,
        verdict: &EligibilityVerdict,
    ) -> Report {
        Self::assemble_at(session, vehicle, driver, inspector, verdict, Uuid::new_v4().to_string(), Utc::now())
    }

    pub fn assemble_at(
        session: &InspectionSession,
        vehicle: &Vehicle,
        driver: &Driver,
        inspector: &User,
        verdict: &EligibilityVerdict,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Report {
        Report {
            id,
            created_at,
            vehicle: vehicle.clone(),
            driver: driver.clone(),
            inspector: UserProfile::from(inspector),
            inspection_type: session.inspection_type,
            items: session.items.clone(),
            general_attachments: session.general_attachments.clone(),
            inspector_signature: session.inspector_signature.clone(),
            driver_signature: session.driver_signature.clone(),
            blocked: verdict.blocked,
            block_reason: verdict.block_reason(),
        }
    }
}
