use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Report;
use crate::services::eligibility_service::FleetDocumentSummary;

// Lista filtrada de reportes
#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub total: usize,
    pub reports: Vec<Report>,
}

// Tablero de inicio
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub today: NaiveDate,
    pub fleet: FleetDocumentSummary,
    pub own_reports: usize,
    pub total_reports: usize,
}
