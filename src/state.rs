//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No hay estado global: cada test puede armar
//! su propio `AppState` con un `FleetStore` aislado.

use std::sync::Arc;

use crate::config::catalog::CatalogConfig;
use crate::config::environment::EnvironmentConfig;
use crate::repositories::FleetStore;
use crate::services::auth_service::AuthService;
use crate::services::eligibility_service::EligibilityEvaluator;
use crate::services::inspection_service::{InspectionService, SessionRegistry};
use crate::services::jwt_service::{JwtConfig, JwtService};
use crate::services::report_query_service::ReportQueryService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: FleetStore,
    pub catalog_config: Arc<CatalogConfig>,
    /// Inspecciones en curso, una por inspector
    pub sessions: SessionRegistry,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: FleetStore, catalog_config: CatalogConfig) -> Self {
        let jwt = JwtService::new(JwtConfig::from(&config));
        Self {
            config,
            store,
            catalog_config: Arc::new(catalog_config),
            sessions: SessionRegistry::new(),
            jwt,
        }
    }

    pub fn evaluator(&self) -> EligibilityEvaluator {
        EligibilityEvaluator::new(self.config.near_expiry_days)
    }

    pub fn inspection_service(&self) -> InspectionService {
        InspectionService::new(self.store.clone(), self.evaluator(), self.catalog_config.clone())
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            &self.store,
            self.jwt.clone(),
            self.config.max_failed_logins,
            self.config.bcrypt_cost,
        )
    }

    pub fn report_queries(&self) -> ReportQueryService {
        ReportQueryService::new(self.config.utc_offset())
    }
}
