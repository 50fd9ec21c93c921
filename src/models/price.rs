use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Precio de un vehículo en el pricing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub vehicle_id: i64,
    pub currency: String,
    pub price: Decimal,
}

impl Price {
    pub fn new(vehicle_id: i64, currency: impl Into<String>, price: Decimal) -> Self {
        Self {
            vehicle_id,
            currency: currency.into(),
            price,
        }
    }

    /// Formato que consume vehicles-api, p.ej. "USD 12345.67"
    pub fn formatted(&self) -> String {
        format!("{} {}", self.currency, self.price)
    }
}
