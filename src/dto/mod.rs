//! DTOs de la API REST

pub mod api_response;
pub mod price_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
pub use price_dto::PriceQuery;
pub use vehicle_dto::VehicleRequest;
