//! Vehicles API
//!
//! Catálogo de vehículos con enriquecimiento de precio y dirección, y el
//! pricing service que consulta.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
