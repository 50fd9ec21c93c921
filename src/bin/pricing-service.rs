use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use vehicles_api::config::{DatabaseConfig, PricingConfig};
use vehicles_api::database::DatabaseConnection;
use vehicles_api::repositories::{InMemoryPriceRepository, PgPriceRepository, PriceStore};
use vehicles_api::routes::create_pricing_app;
use vehicles_api::services::PricingService;
use vehicles_api::state::PricingState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = PricingConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("💰 Pricing Service");

    let store: Arc<dyn PriceStore> = match &config.database_url {
        Some(url) => {
            let db = DatabaseConnection::connect(&DatabaseConfig::new(url.clone())).await?;
            db.migrate_pricing().await?;
            Arc::new(PgPriceRepository::new(db.pool().clone())) as Arc<dyn PriceStore>
        }
        None => {
            warn!("⚠️ PRICING_DATABASE_URL no definida: precios aleatorios en memoria");
            Arc::new(InMemoryPriceRepository::seeded()) as Arc<dyn PriceStore>
        }
    };

    let app = create_pricing_app(PricingState::new(PricingService::new(store)));

    let addr: SocketAddr = config.server_url().parse()?;
    info!("🌐 Pricing service en http://{}", addr);
    info!("   GET /services/price?vehicleId=<id> - Precio de un vehículo");
    info!("   GET /health - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("🛑 Señal Ctrl+C recibida, apagando pricing service...");
            }
        })
        .await?;

    info!("👋 Pricing service terminado");
    Ok(())
}
