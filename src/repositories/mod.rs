//! Repositorios
//!
//! Cada almacén se expone como trait con una implementación Postgres
//! (sqlx) y otra en memoria.

pub mod manufacturer_repository;
pub mod price_repository;
pub mod vehicle_repository;

pub use manufacturer_repository::{InMemoryManufacturerRepository, ManufacturerStore, PgManufacturerRepository};
pub use price_repository::{InMemoryPriceRepository, PgPriceRepository, PriceStore};
pub use vehicle_repository::{InMemoryVehicleRepository, PgVehicleRepository, VehicleStore};
