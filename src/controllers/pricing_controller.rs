use std::sync::Arc;

use crate::dto::PriceQuery;
use crate::models::Price;
use crate::services::PricingService;
use crate::utils::errors::{bad_request_error, AppError};

pub struct PricingController {
    service: Arc<PricingService>,
}

impl PricingController {
    pub fn new(service: Arc<PricingService>) -> Self {
        Self { service }
    }

    pub async fn get_price(&self, query: PriceQuery) -> Result<Price, AppError> {
        let vehicle_id = query
            .vehicle_id
            .ok_or_else(|| bad_request_error("vehicleId query parameter is required"))?;

        self.service.get_price(vehicle_id).await
    }
}
