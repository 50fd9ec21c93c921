use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use vehicles_api::clients::{LocationLookup, MapsClient, PriceClient, PriceLookup};
use vehicles_api::config::{DatabaseConfig, EnvironmentConfig};
use vehicles_api::database::DatabaseConnection;
use vehicles_api::repositories::{
    InMemoryManufacturerRepository, InMemoryVehicleRepository, ManufacturerStore, PgManufacturerRepository,
    PgVehicleRepository, VehicleStore,
};
use vehicles_api::routes::create_app;
use vehicles_api::services::VehicleService;
use vehicles_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚗 Vehicles API ({})", config.environment);
    info!("================================================");

    let (vehicles, manufacturers): (Arc<dyn VehicleStore>, Arc<dyn ManufacturerStore>) =
        match &config.database_url {
            Some(url) => {
                let db = DatabaseConnection::connect(&DatabaseConfig::new(url.clone())).await?;
                db.migrate_vehicles().await?;
                let pool = db.pool().clone();
                (
                    Arc::new(PgVehicleRepository::new(pool.clone())) as Arc<dyn VehicleStore>,
                    Arc::new(PgManufacturerRepository::new(pool)) as Arc<dyn ManufacturerStore>,
                )
            }
            None => {
                warn!("⚠️ DATABASE_URL no definida: usando almacenes en memoria");
                (
                    Arc::new(InMemoryVehicleRepository::new()) as Arc<dyn VehicleStore>,
                    Arc::new(InMemoryManufacturerRepository::with_defaults()) as Arc<dyn ManufacturerStore>,
                )
            }
        };

    let prices: Arc<dyn PriceLookup> = Arc::new(PriceClient::new(&config.pricing_endpoint, config.client_timeout)?);
    let maps: Arc<dyn LocationLookup> = Arc::new(MapsClient::new(&config.maps_endpoint, config.client_timeout)?);
    info!("💰 Pricing service: {}", config.pricing_endpoint);
    info!("🗺️ Maps service: {}", config.maps_endpoint);

    if config.cors_origins.is_empty() && !config.is_development() {
        warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: se acepta cualquier origen");
    }

    let state = AppState::new(VehicleService::new(vehicles, manufacturers, prices, maps));
    let app = create_app(state, &config.cors_origins);

    let addr: SocketAddr = config.server_url().parse()?;
    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   GET    /cars - Listar vehículos");
    info!("   POST   /cars - Crear vehículo");
    info!("   GET    /cars/:id - Obtener vehículo con precio y dirección");
    info!("   PUT    /cars/:id - Actualizar vehículo");
    info!("   DELETE /cars/:id - Eliminar vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
