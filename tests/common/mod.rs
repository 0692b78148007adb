//! Datos compartidos por los tests de integración

#![allow(dead_code)]

use chrono::{Days, NaiveDate};

use fleet_inspection::config::{CatalogConfig, EnvironmentConfig};
use fleet_inspection::models::{CheckItem, Driver, ExpiryDate, User, UserRole, Vehicle};
use fleet_inspection::repositories::FleetStore;
use fleet_inspection::services::auth_service::hash_password;

/// Costo bcrypt mínimo para que los tests sean rápidos
pub const TEST_COST: u32 = 4;
pub const PASSWORD: &str = "secreto123";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

pub fn days_from_today(today: NaiveDate, days: i64) -> ExpiryDate {
    let date = if days >= 0 {
        today.checked_add_days(Days::new(days as u64))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    ExpiryDate::Date(date.unwrap())
}

pub fn vehicle(id: &str, plate: &str, today: NaiveDate) -> Vehicle {
    let far = days_from_today(today, 400);
    Vehicle {
        id: id.to_string(),
        license_plate: plate.to_string(),
        brand: "Chevrolet".to_string(),
        model: "NPR".to_string(),
        vehicle_type: "Camión".to_string(),
        soat_expiry: far.clone(),
        rtm_expiry: far.clone(),
        operating_card_expiry: far.clone(),
        rcc_policy_expiry: far.clone(),
        rce_policy_expiry: far,
    }
}

pub fn driver(id: &str, today: NaiveDate) -> Driver {
    Driver {
        id: id.to_string(),
        full_name: "Roberto Pérez".to_string(),
        national_id: "80123456".to_string(),
        phone: "3101234567".to_string(),
        email: "roberto@example.com".to_string(),
        license_expiry: days_from_today(today, 3650),
    }
}

pub fn check_item(id: &str, name: &str, module: &str, simplified: bool) -> CheckItem {
    CheckItem {
        id: id.to_string(),
        name: name.to_string(),
        module: module.to_string(),
        criterion: "Sin daños visibles".to_string(),
        applies_to_simplified: simplified,
    }
}

/// Catálogo de tres ítems, los tres aplican al chequeo simplificado
pub fn three_item_catalog() -> Vec<CheckItem> {
    vec![
        check_item("i1", "Placas", "5.1 - Documentos y Estado General", true),
        check_item("i2", "Parabrisas", "5.1 - Documentos y Estado General", true),
        check_item("i3", "Llantas delanteras", "5.2 - Llantas, Frenos, Luces y Fugas", true),
    ]
}

pub fn user(id: &str, email: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        full_name: format!("Usuario {}", id),
        national_id: format!("10{}", id),
        email: email.to_string(),
        phone: "3001234567".to_string(),
        role,
        password_hash: hash_password(PASSWORD, TEST_COST).unwrap(),
        security_answers: None,
        failed_login_attempts: 0,
        is_blocked: false,
    }
}

pub fn users() -> Vec<User> {
    vec![
        user("u1", "admin@transtimbio.com", UserRole::Admin),
        user("u2", "mantenimiento@transtimbio.com", UserRole::Maintenance),
        user("u3", "isla@transtimbio.com", UserRole::IslandOperator),
        user("u4", "isla2@transtimbio.com", UserRole::IslandOperator),
    ]
}

pub fn store(today: NaiveDate) -> FleetStore {
    FleetStore::new(
        vec![vehicle("v1", "ABC123", today)],
        vec![driver("c1", today)],
        three_item_catalog(),
        users(),
    )
}

pub fn config() -> EnvironmentConfig {
    EnvironmentConfig {
        bcrypt_cost: TEST_COST,
        ..EnvironmentConfig::default()
    }
}

pub fn catalog_config() -> CatalogConfig {
    CatalogConfig::new(Default::default(), Vec::new())
}
