//! Services module
//!
//! Este módulo contiene la lógica de negocio: la orquestación de vehículos
//! (almacenes + clientes externos) y la consulta de precios.

pub mod pricing_service;
pub mod vehicle_service;

pub use pricing_service::PricingService;
pub use vehicle_service::VehicleService;
