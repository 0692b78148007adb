//! Services module
//!
//! Este módulo contiene la lógica de negocio: elegibilidad, filtro del
//! catálogo, la máquina de estados de la inspección, el ensamblado y las
//! consultas de reportes, y la autenticación.

pub mod auth_service;
pub mod authorization_service;
pub mod catalog_service;
pub mod eligibility_service;
pub mod inspection_service;
pub mod jwt_service;
pub mod report_assembler;
pub mod report_query_service;

pub use auth_service::AuthService;
pub use authorization_service::{AuthorizationService, Capabilities};
pub use catalog_service::{CatalogService, ModuleGroup, SubmoduleGroup};
pub use eligibility_service::{EligibilityEvaluator, EligibilityVerdict};
pub use inspection_service::{
    InspectionError, InspectionService, InspectionSession, InspectionStep, Selection, SessionRegistry,
};
pub use jwt_service::JwtService;
pub use report_assembler::ReportAssembler;
pub use report_query_service::{ReportFilter, ReportQueryService};
