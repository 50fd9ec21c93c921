use async_trait::async_trait;
use std::time::Duration;

use crate::models::Price;
use crate::utils::errors::{AppError, AppResult};

/// Consulta de precio para un vehículo
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn get_price(&self, vehicle_id: i64) -> AppResult<String>;
}

/// Cliente HTTP del pricing service (`GET /services/price?vehicleId=`)
pub struct PriceClient {
    endpoint: String,
    client: reqwest::Client,
}

impl PriceClient {
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
impl PriceLookup for PriceClient {
    async fn get_price(&self, vehicle_id: i64) -> AppResult<String> {
        let url = format!("{}/services/price", self.endpoint);
        log::info!("💰 Consultando precio del vehículo {} en {}", vehicle_id, url);

        let response = self
            .client
            .get(&url)
            .query(&[("vehicleId", vehicle_id)])
            .header("User-Agent", "VehiclesApi/1.0")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Pricing falló con status {}: {}", status, error_text);
            return Err(AppError::ExternalApi(format!(
                "Pricing service returned {} for vehicle {}",
                status, vehicle_id
            )));
        }

        let price: Price = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse price response: {}", e)))?;

        Ok(price.formatted())
    }
}
