//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio: catálogos (vehículos,
//! conductores, ítems, usuarios) y los reportes de inspección.

pub mod auth;
pub mod check_item;
pub mod document;
pub mod driver;
pub mod report;
pub mod user;
pub mod vehicle;

pub use auth::UserRole;
pub use check_item::CheckItem;
pub use document::{DocumentKind, DocumentStatus, ExpiryDate};
pub use driver::Driver;
pub use report::{Attachment, InspectionType, ItemState, Report, ReportItem};
pub use user::{User, UserProfile};
pub use vehicle::Vehicle;
