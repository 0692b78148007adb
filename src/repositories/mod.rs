//! Repositorios
//!
//! Acceso a las colecciones en memoria. Los repositorios solo exponen
//! list/find/create/update/delete; la lógica de negocio vive en `services`.

pub mod check_item_repository;
pub mod driver_repository;
pub mod report_repository;
pub mod store;
pub mod user_repository;
pub mod vehicle_repository;

pub use check_item_repository::CheckItemRepository;
pub use driver_repository::DriverRepository;
pub use report_repository::ReportRepository;
pub use store::{Collection, FleetStore, Identified};
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
