use chrono::NaiveDate;

use crate::dto::report_dto::{HomeResponse, ReportListResponse};
use crate::models::{Report, User};
use crate::repositories::{DriverRepository, ReportRepository, VehicleRepository};
use crate::services::authorization_service::AuthorizationService;
use crate::services::eligibility_service::EligibilityEvaluator;
use crate::services::report_query_service::{ReportFilter, ReportQueryService, StatsPanel};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct ReportController {
    reports: ReportRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
    queries: ReportQueryService,
    evaluator: EligibilityEvaluator,
    today: NaiveDate,
}

impl ReportController {
    pub fn new(state: &AppState) -> Self {
        Self {
            reports: ReportRepository::new(&state.store),
            vehicles: VehicleRepository::new(&state.store),
            drivers: DriverRepository::new(&state.store),
            queries: state.report_queries(),
            evaluator: state.evaluator(),
            today: state.config.today(),
        }
    }

    pub async fn list(&self, user: &User, filter: &ReportFilter) -> ReportListResponse {
        let all = self.reports.list().await;
        let reports: Vec<Report> = self.queries.list(&all, user, filter).into_iter().cloned().collect();
        ReportListResponse {
            total: reports.len(),
            reports,
        }
    }

    /// Un reporte ajeno se responde como inexistente
    pub async fn get(&self, user: &User, id: &str) -> AppResult<Report> {
        self.reports
            .find_by_id(id)
            .await
            .filter(|report| AuthorizationService::can_view_report(user, report))
            .ok_or_else(|| not_found_error("Report", id))
    }

    pub async fn stats(&self, user: &User) -> StatsPanel {
        let all = self.reports.list().await;
        self.queries.stats(&all, user, self.today)
    }

    pub async fn home(&self, user: &User) -> HomeResponse {
        let vehicles = self.vehicles.list().await;
        let drivers = self.drivers.list().await;
        let reports = self.reports.list().await;

        HomeResponse {
            today: self.today,
            fleet: self.evaluator.fleet_summary(&vehicles, &drivers, self.today),
            own_reports: reports.iter().filter(|r| r.inspector.id == user.id).count(),
            total_reports: self.queries.visible(&reports, user).len(),
        }
    }
}
