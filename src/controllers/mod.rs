//! Controladores: validan la entrada y delegan en los servicios

pub mod pricing_controller;
pub mod vehicle_controller;

pub use pricing_controller::PricingController;
pub use vehicle_controller::VehicleController;
