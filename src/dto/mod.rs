//! DTOs de la API
//!
//! Requests (validados con `validator`) y responses de cada recurso.

pub mod api_response;
pub mod auth_dto;
pub mod check_item_dto;
pub mod driver_dto;
pub mod inspection_dto;
pub mod report_dto;
pub mod search_dto;
pub mod user_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
pub use search_dto::SearchQuery;
