//! Controladores
//!
//! Cada controlador se construye por request a partir del `AppState` y
//! concentra la autorización por rol de su recurso.

pub mod auth_controller;
pub mod check_item_controller;
pub mod driver_controller;
pub mod inspection_controller;
pub mod report_controller;
pub mod user_controller;
pub mod vehicle_controller;
