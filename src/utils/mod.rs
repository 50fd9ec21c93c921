//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores compartido.

pub mod errors;
