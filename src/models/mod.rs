//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio del catálogo de vehículos
//! y del pricing service.

pub mod location;
pub mod manufacturer;
pub mod price;
pub mod vehicle;

pub use location::Location;
pub use manufacturer::Manufacturer;
pub use price::Price;
pub use vehicle::{Condition, Details, Vehicle};
