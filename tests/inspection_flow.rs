//! Flujo completo de inspección contra un `FleetStore` en memoria

mod common;

use std::sync::Arc;

use fleet_inspection::models::{InspectionType, ItemState, User, UserRole};
use fleet_inspection::repositories::{FleetStore, ReportRepository, UserRepository, VehicleRepository};
use fleet_inspection::services::eligibility_service::EligibilityEvaluator;
use fleet_inspection::services::inspection_service::{
    InspectionError, InspectionService, InspectionSession, InspectionStep,
};
use fleet_inspection::utils::errors::AppError;

use common::*;

fn service(store: &FleetStore) -> InspectionService {
    InspectionService::new(store.clone(), EligibilityEvaluator::default(), Arc::new(catalog_config()))
}

/// Sesión en `Signature` con todos los ítems completos y ambas firmas
async fn signed_session(service: &InspectionService, inspector: &User) -> InspectionSession {
    let mut session = InspectionSession::new(InspectionType::Full);
    service.select(&mut session, "v1", "c1", today()).await.unwrap();
    service.start(&mut session, inspector).await.unwrap();
    session.mark_all_good().unwrap();
    session.proceed_to_signature().unwrap();
    session.set_inspector_signature("data:image/png;base64,INSPECTOR").unwrap();
    session.set_driver_signature("data:image/png;base64,DRIVER").unwrap();
    session
}

async fn maintenance_user(store: &FleetStore) -> User {
    let user = UserRepository::new(store).find_by_id("u2").await.unwrap();
    assert_eq!(user.role, UserRole::Maintenance);
    user
}

#[tokio::test]
async fn test_advance_requires_complete_checklist() {
    let store = store(today());
    let service = service(&store);
    let inspector = maintenance_user(&store).await;

    let mut session = InspectionSession::new(InspectionType::Full);
    service.select(&mut session, "v1", "c1", today()).await.unwrap();
    assert_eq!(service.start(&mut session, &inspector).await.unwrap(), 3);

    session.set_state("i1", ItemState::Good).unwrap();
    session.set_state("i2", ItemState::Bad).unwrap();
    session.set_observation("i2", "cracked").unwrap();

    let err = session.proceed_to_signature().unwrap_err();
    assert_eq!(
        err,
        InspectionError::IncompleteChecklist {
            first_item_id: "i3".to_string(),
            count: 1
        }
    );
    assert_eq!(session.step, InspectionStep::Inspect);

    session.set_state("i3", ItemState::Good).unwrap();
    session.proceed_to_signature().unwrap();
    assert_eq!(session.step, InspectionStep::Signature);
}

#[tokio::test]
async fn test_finalize_appends_exactly_one_report() {
    let store = store(today());
    let service = service(&store);
    let inspector = maintenance_user(&store).await;
    let reports = ReportRepository::new(&store);

    let mut first = signed_session(&service, &inspector).await;
    let existing = service.finalize(&mut first, &inspector, today()).await.unwrap();
    assert_eq!(reports.count().await, 1);

    let mut second = signed_session(&service, &inspector).await;
    let report = service.finalize(&mut second, &inspector, today()).await.unwrap();

    assert_eq!(reports.count().await, 2);
    assert_ne!(report.id, existing.id);
    assert_eq!(second.step, InspectionStep::Success);
    assert_eq!(second.report_id.as_deref(), Some(report.id.as_str()));
    assert!(!report.blocked);
    assert!(report.block_reason.is_none());
    assert_eq!(report.items.len(), 3);
}

#[tokio::test]
async fn test_finalize_refusal_leaves_collection_unchanged() {
    let store = store(today());
    let service = service(&store);
    let inspector = maintenance_user(&store).await;

    let mut session = signed_session(&service, &inspector).await;
    session.set_driver_signature("   ").unwrap();

    let err = service.finalize(&mut session, &inspector, today()).await.unwrap_err();
    assert!(matches!(err, AppError::Inspection(InspectionError::MissingSignatures)));
    assert_eq!(ReportRepository::new(&store).count().await, 0);
    assert_eq!(session.step, InspectionStep::Signature);

    // Sin pasar por la firma tampoco se puede finalizar
    let mut unsigned = InspectionSession::new(InspectionType::Full);
    service.select(&mut unsigned, "v1", "c1", today()).await.unwrap();
    service.start(&mut unsigned, &inspector).await.unwrap();
    assert!(service.finalize(&mut unsigned, &inspector, today()).await.is_err());
    assert_eq!(ReportRepository::new(&store).count().await, 0);
}

#[tokio::test]
async fn test_expired_insurance_blocks_but_still_records() {
    let store = store(today());
    VehicleRepository::new(&store)
        .update("v1", |v| v.soat_expiry = days_from_today(today(), -1))
        .await
        .unwrap();
    let service = service(&store);
    let inspector = maintenance_user(&store).await;

    let mut session = InspectionSession::new(InspectionType::Full);
    let selection = service.select(&mut session, "v1", "c1", today()).await.unwrap();
    assert_eq!(selection.vehicle.license_plate, "ABC123");
    assert_eq!(selection.driver.id, "c1");
    let verdict = selection.verdict;
    assert!(verdict.blocked);
    assert_eq!(verdict.reasons, vec!["SOAT vencido".to_string()]);

    service.start(&mut session, &inspector).await.unwrap();
    session.mark_all_good().unwrap();
    session.proceed_to_signature().unwrap();
    session.set_inspector_signature("sig-a").unwrap();
    session.set_driver_signature("sig-b").unwrap();

    let report = service.finalize(&mut session, &inspector, today()).await.unwrap();
    assert!(report.blocked);
    let reason = report.block_reason.unwrap();
    assert!(!reason.is_empty());
    assert!(reason.contains("SOAT vencido"));
}

#[tokio::test]
async fn test_report_snapshot_survives_catalog_changes() {
    let store = store(today());
    let service = service(&store);
    let inspector = maintenance_user(&store).await;

    let mut session = signed_session(&service, &inspector).await;
    let report = service.finalize(&mut session, &inspector, today()).await.unwrap();
    assert_eq!(report.vehicle.license_plate, "ABC123");

    VehicleRepository::new(&store)
        .update("v1", |v| v.license_plate = "XYZ999".to_string())
        .await
        .unwrap();

    let stored = ReportRepository::new(&store).find_by_id(&report.id).await.unwrap();
    assert_eq!(stored.vehicle.license_plate, "ABC123");
    assert_eq!(stored.inspector.email, inspector.email);
}

#[tokio::test]
async fn test_finalize_rejects_dangling_vehicle() {
    let store = store(today());
    let service = service(&store);
    let inspector = maintenance_user(&store).await;

    let mut session = signed_session(&service, &inspector).await;
    VehicleRepository::new(&store).delete("v1").await.unwrap();

    let err = service.finalize(&mut session, &inspector, today()).await.unwrap_err();
    assert!(matches!(err, AppError::Integrity(_)));
    assert_eq!(ReportRepository::new(&store).count().await, 0);
    assert_eq!(session.step, InspectionStep::Signature);
}

#[tokio::test]
async fn test_select_unknown_vehicle_is_not_found() {
    let store = store(today());
    let service = service(&store);

    let mut session = InspectionSession::new(InspectionType::Simplified);
    let err = service.select(&mut session, "nope", "c1", today()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(session.vehicle_id.is_none());
}
