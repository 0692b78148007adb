//! Evaluador de elegibilidad
//!
//! Decide si una pareja vehículo/conductor puede operar a partir de las fechas
//! de vencimiento de sus documentos. Es una función pura de sus entradas y de
//! la fecha `today` que recibe; no consulta el reloj.
//!
//! - Vencido: la fecha es anterior a `today`. Bloquea.
//! - Próximo a vencer: faltan menos de `near_expiry_days` días. Solo advierte.
//! - Una fecha mal formada o ausente cuenta como vencida.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::document::{DocumentKind, DocumentStatus, ExpiryDate};
use crate::models::{Driver, Vehicle};

pub const DEFAULT_NEAR_EXPIRY_DAYS: i64 = 30;

/// Prefijo del motivo de bloqueo que se estampa en el reporte
pub const BLOCK_REASON_PREFIX: &str = "NO PUEDE HACER RODAMIENTO";

/// Resultado de evaluar una pareja vehículo/conductor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityVerdict {
    pub blocked: bool,
    /// Un motivo por documento vencido
    pub reasons: Vec<String>,
    /// Documentos próximos a vencer (no bloquean)
    pub warnings: Vec<String>,
}

impl EligibilityVerdict {
    /// Motivo concatenado, solo si la pareja está bloqueada
    pub fn block_reason(&self) -> Option<String> {
        self.blocked
            .then(|| format!("{}: {}", BLOCK_REASON_PREFIX, self.reasons.join(", ")))
    }
}

/// Estado agregado de un vehículo o conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Blocked,
    Alert,
    Ok,
}

/// Estado de un documento individual
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub kind: DocumentKind,
    pub label: &'static str,
    pub expiry: ExpiryDate,
    pub status: DocumentStatus,
    pub days_remaining: Option<i64>,
}

/// Resumen de documentación de la flota (tablero de inicio)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FleetDocumentSummary {
    pub total_vehicles: usize,
    pub vehicles_expired: usize,
    pub vehicles_near_expiry: usize,
    pub total_drivers: usize,
    pub drivers_expired: usize,
    pub drivers_near_expiry: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct EligibilityEvaluator {
    near_expiry_days: i64,
}

impl Default for EligibilityEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_NEAR_EXPIRY_DAYS)
    }
}

impl EligibilityEvaluator {
    pub fn new(near_expiry_days: i64) -> Self {
        Self { near_expiry_days }
    }

    pub fn document_status(&self, expiry: &ExpiryDate, today: NaiveDate) -> DocumentStatus {
        match expiry.date() {
            None => DocumentStatus::Expired,
            Some(date) => {
                let days = (date - today).num_days();
                if days < 0 {
                    DocumentStatus::Expired
                } else if days < self.near_expiry_days {
                    DocumentStatus::NearExpiry
                } else {
                    DocumentStatus::Valid
                }
            }
        }
    }

    pub fn evaluate(&self, vehicle: &Vehicle, driver: &Driver, today: NaiveDate) -> EligibilityVerdict {
        let mut reasons = Vec::new();
        let mut warnings = Vec::new();

        let documents = vehicle
            .documents()
            .into_iter()
            .chain(std::iter::once((DocumentKind::DriverLicense, &driver.license_expiry)));

        for (kind, expiry) in documents {
            match self.document_status(expiry, today) {
                DocumentStatus::Expired => reasons.push(kind.expired_reason().to_string()),
                DocumentStatus::NearExpiry => warnings.push(kind.near_expiry_warning()),
                DocumentStatus::Valid => {}
            }
        }

        EligibilityVerdict {
            blocked: !reasons.is_empty(),
            reasons,
            warnings,
        }
    }

    pub fn vehicle_documents(&self, vehicle: &Vehicle, today: NaiveDate) -> Vec<DocumentReport> {
        vehicle
            .documents()
            .into_iter()
            .map(|(kind, expiry)| self.document_report(kind, expiry, today))
            .collect()
    }

    pub fn driver_documents(&self, driver: &Driver, today: NaiveDate) -> Vec<DocumentReport> {
        vec![self.document_report(DocumentKind::DriverLicense, &driver.license_expiry, today)]
    }

    pub fn vehicle_status(&self, vehicle: &Vehicle, today: NaiveDate) -> OverallStatus {
        aggregate(vehicle.documents().iter().map(|(_, expiry)| self.document_status(expiry, today)))
    }

    pub fn driver_status(&self, driver: &Driver, today: NaiveDate) -> OverallStatus {
        aggregate(std::iter::once(self.document_status(&driver.license_expiry, today)))
    }

    pub fn fleet_summary(&self, vehicles: &[Vehicle], drivers: &[Driver], today: NaiveDate) -> FleetDocumentSummary {
        let mut summary = FleetDocumentSummary {
            total_vehicles: vehicles.len(),
            total_drivers: drivers.len(),
            ..FleetDocumentSummary::default()
        };

        for vehicle in vehicles {
            match self.vehicle_status(vehicle, today) {
                OverallStatus::Blocked => summary.vehicles_expired += 1,
                OverallStatus::Alert => summary.vehicles_near_expiry += 1,
                OverallStatus::Ok => {}
            }
        }
        for driver in drivers {
            match self.driver_status(driver, today) {
                OverallStatus::Blocked => summary.drivers_expired += 1,
                OverallStatus::Alert => summary.drivers_near_expiry += 1,
                OverallStatus::Ok => {}
            }
        }

        summary
    }

    fn document_report(&self, kind: DocumentKind, expiry: &ExpiryDate, today: NaiveDate) -> DocumentReport {
        DocumentReport {
            kind,
            label: kind.label(),
            expiry: expiry.clone(),
            status: self.document_status(expiry, today),
            days_remaining: expiry.date().map(|date| (date - today).num_days()),
        }
    }
}

fn aggregate(statuses: impl Iterator<Item = DocumentStatus>) -> OverallStatus {
    let mut overall = OverallStatus::Ok;
    for status in statuses {
        match status {
            DocumentStatus::Expired => return OverallStatus::Blocked,
            DocumentStatus::NearExpiry => overall = OverallStatus::Alert,
            DocumentStatus::Valid => {}
        }
    }
    overall
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn vehicle_with_all(expiry: ExpiryDate) -> Vehicle {
        Vehicle {
            id: "v1".to_string(),
            license_plate: "ABC123".to_string(),
            brand: "Chevrolet".to_string(),
            model: "NPR".to_string(),
            vehicle_type: "Camión".to_string(),
            soat_expiry: expiry.clone(),
            rtm_expiry: expiry.clone(),
            operating_card_expiry: expiry.clone(),
            rcc_policy_expiry: expiry.clone(),
            rce_policy_expiry: expiry,
        }
    }

    fn driver_with(expiry: ExpiryDate) -> Driver {
        Driver {
            id: "c1".to_string(),
            full_name: "Roberto Pérez".to_string(),
            national_id: "80123456".to_string(),
            phone: "3101234567".to_string(),
            email: "roberto@example.com".to_string(),
            license_expiry: expiry,
        }
    }

    fn far_future() -> ExpiryDate {
        ExpiryDate::Date(today() + Duration::days(800))
    }

    #[test]
    fn test_document_status_boundaries() {
        let evaluator = EligibilityEvaluator::default();
        let at = |days: i64| ExpiryDate::Date(today() + Duration::days(days));

        assert_eq!(evaluator.document_status(&at(-1), today()), DocumentStatus::Expired);
        assert_eq!(evaluator.document_status(&at(0), today()), DocumentStatus::NearExpiry);
        assert_eq!(evaluator.document_status(&at(29), today()), DocumentStatus::NearExpiry);
        assert_eq!(evaluator.document_status(&at(30), today()), DocumentStatus::Valid);
    }

    #[test]
    fn test_malformed_and_missing_dates_fail_closed() {
        let evaluator = EligibilityEvaluator::default();
        assert_eq!(
            evaluator.document_status(&ExpiryDate::parse("31/12/2099"), today()),
            DocumentStatus::Expired
        );
        assert_eq!(evaluator.document_status(&ExpiryDate::Missing, today()), DocumentStatus::Expired);

        let verdict = evaluator.evaluate(&vehicle_with_all(far_future()), &driver_with(ExpiryDate::Missing), today());
        assert!(verdict.blocked);
        assert_eq!(verdict.reasons, vec!["Licencia de conducción vencida"]);
    }

    #[test]
    fn test_expired_soat_blocks_with_single_reason() {
        let evaluator = EligibilityEvaluator::default();
        let mut vehicle = vehicle_with_all(far_future());
        vehicle.soat_expiry = ExpiryDate::Date(today() - Duration::days(1));

        let verdict = evaluator.evaluate(&vehicle, &driver_with(far_future()), today());
        assert!(verdict.blocked);
        assert_eq!(verdict.reasons, vec!["SOAT vencido"]);
        assert!(verdict.warnings.is_empty());
        assert_eq!(
            verdict.block_reason().as_deref(),
            Some("NO PUEDE HACER RODAMIENTO: SOAT vencido")
        );
    }

    #[test]
    fn test_near_expiry_only_warns() {
        let evaluator = EligibilityEvaluator::default();
        let mut vehicle = vehicle_with_all(far_future());
        vehicle.rtm_expiry = ExpiryDate::Date(today() + Duration::days(10));

        let verdict = evaluator.evaluate(&vehicle, &driver_with(far_future()), today());
        assert!(!verdict.blocked);
        assert!(verdict.reasons.is_empty());
        assert_eq!(verdict.warnings, vec!["RTM próximo a vencer"]);
        assert_eq!(verdict.block_reason(), None);
    }

    #[test]
    fn test_every_document_reported_in_order() {
        let evaluator = EligibilityEvaluator::default();
        let expired = ExpiryDate::Date(today() - Duration::days(40));
        let verdict = evaluator.evaluate(&vehicle_with_all(expired.clone()), &driver_with(expired), today());

        assert_eq!(
            verdict.reasons,
            vec![
                "SOAT vencido",
                "RTM vencida",
                "Tarjeta de Operación vencida",
                "Póliza RCC vencida",
                "Póliza RCE vencida",
                "Licencia de conducción vencida",
            ]
        );
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let evaluator = EligibilityEvaluator::default();
        let vehicle = vehicle_with_all(ExpiryDate::Date(today() + Duration::days(5)));
        let driver = driver_with(ExpiryDate::Date(today() - Duration::days(5)));

        assert_eq!(
            evaluator.evaluate(&vehicle, &driver, today()),
            evaluator.evaluate(&vehicle, &driver, today())
        );
    }

    #[test]
    fn test_fleet_summary() {
        let evaluator = EligibilityEvaluator::default();
        let vehicles = vec![
            vehicle_with_all(far_future()),
            vehicle_with_all(ExpiryDate::Date(today() + Duration::days(3))),
            vehicle_with_all(ExpiryDate::Date(today() - Duration::days(3))),
        ];
        let drivers = vec![driver_with(far_future()), driver_with(ExpiryDate::parse("bad"))];

        let summary = evaluator.fleet_summary(&vehicles, &drivers, today());
        assert_eq!(summary.total_vehicles, 3);
        assert_eq!(summary.vehicles_expired, 1);
        assert_eq!(summary.vehicles_near_expiry, 1);
        assert_eq!(summary.drivers_expired, 1);
        assert_eq!(summary.drivers_near_expiry, 0);
    }

    #[test]
    fn test_vehicle_documents_days_remaining() {
        let evaluator = EligibilityEvaluator::default();
        let docs = evaluator.vehicle_documents(&vehicle_with_all(ExpiryDate::Date(today() + Duration::days(12))), today());
        assert_eq!(docs.len(), 5);
        assert!(docs.iter().all(|d| d.days_remaining == Some(12)));
        assert_eq!(docs[2].label, "Tarjeta de Operación");
    }
}
