use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::models::Location;
use crate::utils::errors::{AppError, AppResult};

/// Enriquecimiento de coordenadas con una dirección postal
#[async_trait]
pub trait LocationLookup: Send + Sync {
    async fn get_address(&self, location: &Location) -> AppResult<Location>;
}

/// Respuesta del servicio de mapas
#[derive(Debug, Deserialize)]
struct MapsAddress {
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
}

/// Cliente HTTP del servicio de mapas (`GET /maps?lat=&lon=`)
pub struct MapsClient {
    endpoint: String,
    client: reqwest::Client,
}

impl MapsClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl LocationLookup for MapsClient {
    async fn get_address(&self, location: &Location) -> AppResult<Location> {
        let url = format!("{}/maps", self.endpoint);
        log::info!("🗺️ Reverse geocoding ({}, {})", location.lat, location.lon);

        let response = self
            .client
            .get(&url)
            .query(&[("lat", location.lat), ("lon", location.lon)])
            .header("User-Agent", "VehiclesApi/1.0")
            .send()
            .await?;

        let status = response.status();
        log::debug!("📡 Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Maps falló con status {}: {}", status, error_text);
            return Err(AppError::ExternalApi(format!("Maps service returned {}", status)));
        }

        let address: MapsAddress = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse maps response: {}", e)))?;

        Ok(Location {
            lat: location.lat,
            lon: location.lon,
            address: address.address,
            city: address.city,
            state: address.state,
            zip: address.zip,
        })
    }
}
