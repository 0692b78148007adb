//! Inspección preoperacional de flota
//!
//! Catálogo de vehículos, conductores e ítems de chequeo, evaluación de
//! elegibilidad por vencimiento de documentos, flujo de inspección con firmas
//! y reportes inmutables con estadísticas.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
