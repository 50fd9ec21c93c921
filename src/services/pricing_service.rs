use std::sync::Arc;

use crate::models::Price;
use crate::repositories::PriceStore;
use crate::utils::errors::{AppError, AppResult};

/// Consulta de precios del pricing service
pub struct PricingService {
    store: Arc<dyn PriceStore>,
}

impl PricingService {
    pub fn new(store: Arc<dyn PriceStore>) -> Self {
        Self { store }
    }

    pub async fn get_price(&self, vehicle_id: i64) -> AppResult<Price> {
        self.store
            .find_by_vehicle_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cannot find price for Vehicle {}", vehicle_id)))
    }
}
