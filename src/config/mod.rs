//! Configuración del proyecto
//!
//! Variables de entorno, configuración del catálogo de ítems (submódulos y
//! exclusiones) y datos semilla.

pub mod catalog;
pub mod environment;
pub mod seed;

pub use catalog::CatalogConfig;
pub use environment::*;
