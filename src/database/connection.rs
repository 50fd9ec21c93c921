//! Configuración de conexión a PostgreSQL
//!
//! Abre el pool y aplica las migraciones embebidas de cada servicio.

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Conexión abierta a la base de datos
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear el pool de conexiones
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        log::info!("🐘 Conectando a {}", mask_database_url(&config.url));

        let pool = config
            .create_pool()
            .await
            .with_context(|| format!("Cannot connect to {}", mask_database_url(&config.url)))?;

        Ok(Self { pool })
    }

    /// Migraciones del catálogo (manufacturers, vehicles)
    pub async fn migrate_vehicles(&self) -> Result<()> {
        vehicles_migrator()
            .run(&self.pool)
            .await
            .context("Vehicle catalog migrations failed")?;
        log::info!("✅ Migraciones del catálogo aplicadas");
        Ok(())
    }

    /// Migraciones del pricing service (prices)
    pub async fn migrate_pricing(&self) -> Result<()> {
        pricing_migrator()
            .run(&self.pool)
            .await
            .context("Pricing migrations failed")?;
        log::info!("✅ Migraciones de precios aplicadas");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// Los dos servicios comparten la tabla _sqlx_migrations cuando usan la misma
// base: cada migrador ignora las versiones aplicadas por el otro.
fn vehicles_migrator() -> Migrator {
    let mut migrator = sqlx::migrate!("./migrations/vehicles");
    migrator.set_ignore_missing(true);
    migrator
}

fn pricing_migrator() -> Migrator {
    let mut migrator = sqlx::migrate!("./migrations/pricing");
    migrator.set_ignore_missing(true);
    migrator
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };
    if url[..at_pos].rfind(':').is_none() {
        return url.to_string();
    }

    let protocol = url.find("://").map_or("", |pos| &url[..pos + 3]);
    format!("{}***:***@{}", protocol, &url[at_pos + 1..])
}
