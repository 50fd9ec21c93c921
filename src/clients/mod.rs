//! Clients - HTTP Clients for External APIs
//!
//! Clientes para el pricing service y el servicio de mapas.

pub mod maps_client;
pub mod price_client;

pub use maps_client::{LocationLookup, MapsClient};
pub use price_client::{PriceClient, PriceLookup};
