use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::models::Price;
use crate::utils::errors::AppResult;

/// Vehículos con precio en la tabla precargada
pub const SEEDED_VEHICLE_IDS: std::ops::RangeInclusive<i64> = 1..=19;

#[async_trait]
pub trait PriceStore: Send + Sync {
    async fn find_by_vehicle_id(&self, vehicle_id: i64) -> AppResult<Option<Price>>;
}

pub struct PgPriceRepository {
    pool: PgPool,
}

impl PgPriceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceStore for PgPriceRepository {
    async fn find_by_vehicle_id(&self, vehicle_id: i64) -> AppResult<Option<Price>> {
        let price = sqlx::query_as::<_, Price>(
            "SELECT vehicle_id, currency, price FROM prices WHERE vehicle_id = $1",
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(price)
    }
}

/// Tabla de precios en memoria. Solo lectura una vez construida.
pub struct InMemoryPriceRepository {
    prices: HashMap<i64, Price>,
}

impl InMemoryPriceRepository {
    pub fn new(prices: impl IntoIterator<Item = Price>) -> Self {
        Self {
            prices: prices.into_iter().map(|p| (p.vehicle_id, p)).collect(),
        }
    }

    /// Precios aleatorios en USD entre 5000.00 y 25000.00 para los ids 1..=19
    pub fn seeded() -> Self {
        let mut rng = rand::thread_rng();
        Self::new(
            SEEDED_VEHICLE_IDS
                .map(|id| Price::new(id, "USD", Decimal::new(rng.gen_range(500_000..=2_500_000), 2))),
        )
    }
}

#[async_trait]
impl PriceStore for InMemoryPriceRepository {
    async fn find_by_vehicle_id(&self, vehicle_id: i64) -> AppResult<Option<Price>> {
        Ok(self.prices.get(&vehicle_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_prices_cover_known_ids() {
        let repo = InMemoryPriceRepository::seeded();
        let min = Decimal::new(500_000, 2);
        let max = Decimal::new(2_500_000, 2);

        for id in SEEDED_VEHICLE_IDS {
            let price = repo.find_by_vehicle_id(id).await.unwrap().unwrap();
            assert_eq!(price.currency, "USD");
            assert!(price.price >= min && price.price <= max);
        }
        assert!(repo.find_by_vehicle_id(20).await.unwrap().is_none());
    }
}
