//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración de los dos procesos (vehicles-api y
//! pricing-service). Todas las variables tienen valor por defecto salvo las
//! URLs de base de datos, que son opcionales.
//!
//! `DATABASE_URL` y `PRICING_DATABASE_URL` pueden apuntar a la misma base:
//! cada proceso aplica solo sus migraciones y las versiones no se pisan.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Configuración de vehicles-api
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub pricing_endpoint: String,
    pub maps_endpoint: String,
    pub client_timeout: Duration,
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs: u64 = parse_or(&lookup, "CLIENT_TIMEOUT_SECS", 10)?;

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            pricing_endpoint: lookup("PRICING_ENDPOINT")
                .unwrap_or_else(|| "http://localhost:8082".to_string()),
            maps_endpoint: lookup("MAPS_ENDPOINT").unwrap_or_else(|| "http://localhost:9191".to_string()),
            client_timeout: Duration::from_secs(timeout_secs),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| split_list(&origins))
                .unwrap_or_default(),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tracing_level(&self) -> tracing::Level {
        parse_level(&self.log_level)
    }
}

/// Configuración del pricing service
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
}

impl PricingConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PRICING_PORT", 8082)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            database_url: lookup("PRICING_DATABASE_URL").filter(|url| !url.trim().is_empty()),
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tracing_level(&self) -> tracing::Level {
        parse_level(&self.log_level)
    }
}

/// Nivel de `LOG_LEVEL`; `info` si no se reconoce
fn parse_level(level: &str) -> tracing::Level {
    level.trim().parse().unwrap_or(tracing::Level::INFO)
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", key, value)),
        None => Ok(default),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
