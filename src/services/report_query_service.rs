//! Consultas y estadísticas de reportes
//!
//! Solo lectura. Los días y meses se calculan en el calendario local
//! configurado (`UTC_OFFSET_MINUTES`), no en UTC.

use chrono::{Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{InspectionType, Report, User};
use crate::services::authorization_service::AuthorizationService;

/// Filtros de la lista de reportes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFilter {
    /// Texto libre sobre placa, conductor e inspector
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub inspection_type: Option<InspectionType>,
}

/// Conteo con su porcentaje sobre el total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountBucket {
    pub key: String,
    /// Nombre para mostrar cuando la clave es un id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub total: usize,
    pub full: usize,
    pub simplified: usize,
}

impl TypeCounts {
    fn from_reports<'a>(reports: impl Iterator<Item = &'a Report>) -> Self {
        let mut counts = Self::default();
        for report in reports {
            counts.total += 1;
            match report.inspection_type {
                InspectionType::Full => counts.full += 1,
                InspectionType::Simplified => counts.simplified += 1,
            }
        }
        counts
    }
}

/// Panel de estadísticas para un inspector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsPanel {
    pub today: NaiveDate,
    pub today_counts: TypeCounts,
    pub month_counts: TypeCounts,
    pub own_month_counts: TypeCounts,
    /// Participación del inspector en el total del mes
    pub own_share_percentage: f64,
    /// Reportes del mes del inspector divididos por el día del mes
    pub own_average_per_day: f64,
    pub month_by_inspector: Vec<CountBucket>,
    pub by_day: Vec<CountBucket>,
    pub by_month: Vec<CountBucket>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportQueryService {
    offset: FixedOffset,
}

impl ReportQueryService {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn local_date(&self, report: &Report) -> NaiveDate {
        report.created_at.with_timezone(&self.offset).date_naive()
    }

    /// Reportes que `user` puede ver
    pub fn visible<'a>(&self, reports: &'a [Report], user: &User) -> Vec<&'a Report> {
        reports
            .iter()
            .filter(|report| AuthorizationService::can_view_report(user, report))
            .collect()
    }

    pub fn filter<'a>(&self, reports: Vec<&'a Report>, filter: &ReportFilter) -> Vec<&'a Report> {
        let search = filter
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        reports
            .into_iter()
            .filter(|report| match filter.inspection_type {
                Some(kind) => report.inspection_type == kind,
                None => true,
            })
            .filter(|report| match &search {
                Some(term) => {
                    report.vehicle.license_plate.to_lowercase().contains(term)
                        || report.driver.full_name.to_lowercase().contains(term)
                        || report.inspector.full_name.to_lowercase().contains(term)
                }
                None => true,
            })
            .collect()
    }

    /// Lista visible y filtrada, más reciente primero
    pub fn list<'a>(&self, reports: &'a [Report], user: &User, filter: &ReportFilter) -> Vec<&'a Report> {
        let mut found = self.filter(self.visible(reports, user), filter);
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    pub fn count_by_day(&self, reports: &[Report]) -> Vec<CountBucket> {
        self.bucket(reports, |report| (self.local_date(report).format("%Y-%m-%d").to_string(), None))
    }

    pub fn count_by_month(&self, reports: &[Report]) -> Vec<CountBucket> {
        self.bucket(reports, |report| (self.local_date(report).format("%Y-%m").to_string(), None))
    }

    /// Por id de inspector, de mayor a menor; `label` lleva el nombre
    pub fn count_by_inspector(&self, reports: &[Report]) -> Vec<CountBucket> {
        let mut buckets = self.bucket(reports, |report| {
            (report.inspector.id.clone(), Some(report.inspector.full_name.clone()))
        });
        buckets.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.label.cmp(&b.label))
                .then_with(|| a.key.cmp(&b.key))
        });
        buckets
    }

    pub fn stats(&self, reports: &[Report], user: &User, today: NaiveDate) -> StatsPanel {
        let same_month = |date: NaiveDate| date.year() == today.year() && date.month() == today.month();

        let month: Vec<Report> = reports
            .iter()
            .filter(|report| same_month(self.local_date(report)))
            .cloned()
            .collect();
        let own_month_counts = TypeCounts::from_reports(month.iter().filter(|r| r.inspector.id == user.id));
        let month_counts = TypeCounts::from_reports(month.iter());

        StatsPanel {
            today,
            today_counts: TypeCounts::from_reports(reports.iter().filter(|r| self.local_date(r) == today)),
            month_counts,
            own_month_counts,
            own_share_percentage: percentage(own_month_counts.total, month_counts.total),
            own_average_per_day: round1(own_month_counts.total as f64 / today.day() as f64),
            month_by_inspector: self.count_by_inspector(&month),
            by_day: self.count_by_day(reports),
            by_month: self.count_by_month(reports),
        }
    }

    fn bucket<F>(&self, reports: &[Report], key: F) -> Vec<CountBucket>
    where
        F: Fn(&Report) -> (String, Option<String>),
    {
        let mut counts: BTreeMap<String, (Option<String>, usize)> = BTreeMap::new();
        for report in reports {
            let (key, label) = key(report);
            counts.entry(key).or_insert((label, 0)).1 += 1;
        }
        counts
            .into_iter()
            .map(|(key, (label, count))| CountBucket {
                key,
                label,
                count,
                percentage: percentage(count, reports.len()),
            })
            .collect()
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 * 100.0 / total as f64)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::models::{Driver, ExpiryDate, UserProfile, Vehicle};
    use chrono::{DateTime, TimeZone, Utc};

    fn user(id: &str, name: &str, role: UserRole) -> User {
        User {
            id: id.to_string(),
            full_name: name.to_string(),
            national_id: "1000".to_string(),
            email: format!("{}@example.com", id),
            phone: "3000000000".to_string(),
            role,
            password_hash: String::new(),
            security_answers: None,
            failed_login_attempts: 0,
            is_blocked: false,
        }
    }

    fn report(id: &str, inspector: &User, plate: &str, kind: InspectionType, at: DateTime<Utc>) -> Report {
        let date = ExpiryDate::Date(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        Report {
            id: id.to_string(),
            created_at: at,
            vehicle: Vehicle {
                id: format!("v-{}", plate),
                license_plate: plate.to_string(),
                brand: "Chevrolet".to_string(),
                model: "NPR".to_string(),
                vehicle_type: "Camión".to_string(),
                soat_expiry: date.clone(),
                rtm_expiry: date.clone(),
                operating_card_expiry: date.clone(),
                rcc_policy_expiry: date.clone(),
                rce_policy_expiry: date.clone(),
            },
            driver: Driver {
                id: "c1".to_string(),
                full_name: "Roberto Pérez".to_string(),
                national_id: "80123456".to_string(),
                phone: "3101234567".to_string(),
                email: "roberto@example.com".to_string(),
                license_expiry: date,
            },
            inspector: UserProfile::from(inspector),
            inspection_type: kind,
            items: Vec::new(),
            general_attachments: Vec::new(),
            inspector_signature: "sig".to_string(),
            driver_signature: "sig".to_string(),
            blocked: false,
            block_reason: None,
        }
    }

    fn colombia() -> ReportQueryService {
        ReportQueryService::new(FixedOffset::west_opt(5 * 3600).unwrap())
    }

    fn fixture() -> (User, User, User, Vec<Report>) {
        let admin = user("u1", "Ana Admin", UserRole::Admin);
        let mechanic = user("u3", "Carlos Mecánico", UserRole::Maintenance);
        let islero = user("u4", "Diana Isla", UserRole::IslandOperator);
        let reports = vec![
            report("r1", &mechanic, "ABC123", InspectionType::Full, Utc.with_ymd_and_hms(2025, 6, 10, 15, 0, 0).unwrap()),
            report("r2", &mechanic, "XYZ789", InspectionType::Full, Utc.with_ymd_and_hms(2025, 6, 15, 14, 0, 0).unwrap()),
            report("r3", &islero, "ABC123", InspectionType::Simplified, Utc.with_ymd_and_hms(2025, 6, 15, 16, 0, 0).unwrap()),
            // 02:00 UTC del 1 de junio es todavía 31 de mayo en Colombia
            report("r4", &islero, "DEF456", InspectionType::Simplified, Utc.with_ymd_and_hms(2025, 6, 1, 2, 0, 0).unwrap()),
        ];
        (admin, mechanic, islero, reports)
    }

    #[test]
    fn test_visibility_by_role() {
        let (admin, mechanic, _, reports) = fixture();
        let service = colombia();

        assert_eq!(service.visible(&reports, &admin).len(), 4);
        let own: Vec<&str> = service.visible(&reports, &mechanic).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(own, vec!["r1", "r2"]);
    }

    #[test]
    fn test_search_and_type_filter() {
        let (admin, _, _, reports) = fixture();
        let service = colombia();

        let filter = ReportFilter {
            search: Some("abc".to_string()),
            inspection_type: None,
        };
        assert_eq!(service.list(&reports, &admin, &filter).len(), 2);

        let filter = ReportFilter {
            search: Some("diana".to_string()),
            inspection_type: Some(InspectionType::Simplified),
        };
        let found = service.list(&reports, &admin, &filter);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, "r3");

        let filter = ReportFilter {
            search: Some("roberto".to_string()),
            inspection_type: Some(InspectionType::Full),
        };
        assert_eq!(service.list(&reports, &admin, &filter).len(), 2);
    }

    #[test]
    fn test_buckets_use_local_calendar() {
        let (_, _, _, reports) = fixture();
        let service = colombia();

        let months = service.count_by_month(&reports);
        assert_eq!(months[0].key, "2025-05");
        assert_eq!(months[0].count, 1);
        assert_eq!(months[0].percentage, 25.0);
        assert_eq!(months[1].count, 3);

        let days = service.count_by_day(&reports);
        let june_15 = days.iter().find(|b| b.key == "2025-06-15").unwrap();
        assert_eq!(june_15.count, 2);
        assert_eq!(june_15.percentage, 50.0);
    }

    #[test]
    fn test_by_inspector_sorted_by_count() {
        let (_, _, _, reports) = fixture();
        let buckets = colombia().count_by_inspector(&reports[..3]);
        assert_eq!(buckets[0].key, "u3");
        assert_eq!(buckets[0].label.as_deref(), Some("Carlos Mecánico"));
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].percentage, 66.7);
    }

    #[test]
    fn test_namesakes_get_separate_buckets() {
        let first = user("u1", "Juan Pérez", UserRole::Maintenance);
        let second = user("u2", "Juan Pérez", UserRole::Maintenance);
        let at = Utc.with_ymd_and_hms(2025, 6, 10, 15, 0, 0).unwrap();
        let reports = vec![
            report("r1", &first, "ABC123", InspectionType::Full, at),
            report("r2", &second, "XYZ789", InspectionType::Full, at),
        ];

        let buckets = colombia().count_by_inspector(&reports);
        assert_eq!(buckets.len(), 2);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["u1", "u2"]);
        assert!(buckets.iter().all(|b| b.label.as_deref() == Some("Juan Pérez")));
        assert!(buckets.iter().all(|b| b.count == 1 && b.percentage == 50.0));

        let panel = colombia().stats(&reports, &first, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(panel.month_by_inspector.len(), 2);
    }

    #[test]
    fn test_stats_panel() {
        let (_, mechanic, _, reports) = fixture();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let panel = colombia().stats(&reports, &mechanic, today);

        assert_eq!(panel.today_counts, TypeCounts { total: 2, full: 1, simplified: 1 });
        assert_eq!(panel.month_counts.total, 3);
        assert_eq!(panel.own_month_counts, TypeCounts { total: 2, full: 2, simplified: 0 });
        assert_eq!(panel.own_share_percentage, 66.7);
        // 2 reportes / día 15
        assert_eq!(panel.own_average_per_day, 0.1);
        assert_eq!(panel.month_by_inspector.len(), 2);
    }

    #[test]
    fn test_empty_stats_do_not_divide_by_zero() {
        let (_, mechanic, _, _) = fixture();
        let panel = colombia().stats(&[], &mechanic, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(panel.own_share_percentage, 0.0);
        assert_eq!(panel.own_average_per_day, 0.0);
        assert!(panel.by_day.is_empty());
    }
}
