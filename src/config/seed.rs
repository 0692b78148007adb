//! Datos semilla
//!
//! Carga opcional del catálogo inicial desde JSON. Las contraseñas de la semilla
//! vienen en texto plano (solo desarrollo) y se convierten a hash bcrypt al
//! cargar. Las fechas mal formadas se conservan marcadas y cuentan como vencidas.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::models::auth::UserRole;
use crate::models::{CheckItem, Driver, User, Vehicle};
use crate::repositories::FleetStore;
use crate::services::auth_service::hash_password;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub id: String,
    pub full_name: String,
    pub national_id: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
}

#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub drivers: Vec<Driver>,
    pub vehicles: Vec<Vehicle>,
    pub check_items: Vec<CheckItem>,
}

impl SeedFile {
    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| AppError::Internal(format!("Invalid seed file: {}", e)))
    }

    /// Convierte la semilla en entidades, con las contraseñas ya en hash
    pub fn into_data(self, bcrypt_cost: u32) -> AppResult<SeedData> {
        let users = self
            .users
            .into_iter()
            .map(|seed| {
                Ok(User {
                    password_hash: hash_password(&seed.password, bcrypt_cost)?,
                    id: seed.id,
                    full_name: seed.full_name,
                    national_id: seed.national_id,
                    email: seed.email,
                    phone: seed.phone,
                    role: seed.role,
                    security_answers: None,
                    failed_login_attempts: 0,
                    is_blocked: false,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        for vehicle in &self.vehicles {
            for (kind, expiry) in vehicle.documents() {
                if !expiry.is_valid() {
                    warn!("⚠️ Vehicle {} has an unreadable {} date: {}", vehicle.license_plate, kind.label(), expiry);
                }
            }
        }
        for driver in &self.drivers {
            if !driver.license_expiry.is_valid() {
                warn!("⚠️ Driver {} has an unreadable license date: {}", driver.full_name, driver.license_expiry);
            }
        }

        Ok(SeedData {
            users,
            drivers: self.drivers,
            vehicles: self.vehicles,
            check_items: self.check_items,
        })
    }
}

impl SeedData {
    pub fn into_store(self) -> FleetStore {
        FleetStore::new(self.vehicles, self.drivers, self.check_items, self.users)
    }
}

/// Lee y convierte el archivo de semilla
pub fn load_seed(path: &str, bcrypt_cost: u32) -> AppResult<SeedData> {
    let raw = fs::read_to_string(Path::new(path))
        .map_err(|e| AppError::Internal(format!("Cannot read seed {}: {}", path, e)))?;
    let data = SeedFile::from_json(&raw)?.into_data(bcrypt_cost)?;

    info!(
        "🌱 Seed loaded: {} users, {} drivers, {} vehicles, {} check items",
        data.users.len(),
        data.drivers.len(),
        data.vehicles.len(),
        data.check_items.len()
    );
    Ok(data)
}
