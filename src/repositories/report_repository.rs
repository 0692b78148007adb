use std::sync::Arc;

use crate::models::Report;
use crate::repositories::store::{Collection, FleetStore};
use crate::utils::errors::{AppError, AppResult};

/// Los reportes solo se agregan; nunca se modifican ni se eliminan
pub struct ReportRepository {
    reports: Arc<Collection<Report>>,
}

impl ReportRepository {
    pub fn new(store: &FleetStore) -> Self {
        Self {
            reports: store.reports.clone(),
        }
    }

    pub async fn append(&self, report: Report) -> AppResult<Report> {
        self.reports
            .modify(|reports| {
                if reports.iter().any(|r| r.id == report.id) {
                    return Err(AppError::Integrity(format!("Report id '{}' already exists", report.id)));
                }
                reports.push(report.clone());
                Ok(report)
            })
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Report> {
        self.reports.find(id).await
    }

    pub async fn list(&self) -> Vec<Report> {
        self.reports.list().await
    }

    pub async fn count(&self) -> usize {
        self.reports.len().await
    }
}
