use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::{Condition, Details, Location, Manufacturer, Vehicle};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Almacén de vehículos. Solo persiste los campos no derivados: el precio y
/// la dirección enriquecida se descartan al guardar.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;

    /// Inserta si `id` es None, si no actualiza el registro existente
    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    async fn delete(&self, vehicle: &Vehicle) -> AppResult<()>;
}

const SELECT_VEHICLES: &str = r#"
    SELECT v.id, v.condition, v.body, v.model, v.manufacturer_code, m.name AS manufacturer_name,
           v.number_of_doors, v.fuel_type, v.engine, v.mileage, v.model_year, v.production_year,
           v.external_color, v.latitude, v.longitude, v.created_at, v.modified_at
    FROM vehicles v
    LEFT JOIN manufacturers m ON m.code = v.manufacturer_code
"#;

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    condition: String,
    body: String,
    model: String,
    manufacturer_code: Option<i32>,
    manufacturer_name: Option<String>,
    number_of_doors: Option<i32>,
    fuel_type: Option<String>,
    engine: Option<String>,
    mileage: Option<i32>,
    model_year: Option<i32>,
    production_year: Option<i32>,
    external_color: Option<String>,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let condition = row.condition.parse::<Condition>().map_err(AppError::Internal)?;

        Ok(Vehicle {
            id: Some(row.id),
            created_at: Some(row.created_at),
            modified_at: Some(row.modified_at),
            condition,
            details: Details {
                body: row.body,
                model: row.model,
                manufacturer: Manufacturer {
                    code: row.manufacturer_code,
                    name: row.manufacturer_name.unwrap_or_default(),
                },
                number_of_doors: row.number_of_doors,
                fuel_type: row.fuel_type,
                engine: row.engine,
                mileage: row.mileage,
                model_year: row.model_year,
                production_year: row.production_year,
                external_color: row.external_color,
            },
            location: Location::new(row.latitude, row.longitude),
            price: None,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SavedRow {
    id: i64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, vehicle: &Vehicle) -> AppResult<SavedRow> {
        let details = &vehicle.details;
        let row = sqlx::query_as::<_, SavedRow>(
            r#"
            INSERT INTO vehicles (condition, body, model, manufacturer_code, number_of_doors, fuel_type,
                                  engine, mileage, model_year, production_year, external_color,
                                  latitude, longitude, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING id, created_at, modified_at
            "#,
        )
        .bind(vehicle.condition.as_str())
        .bind(&details.body)
        .bind(&details.model)
        .bind(details.manufacturer.code)
        .bind(details.number_of_doors)
        .bind(&details.fuel_type)
        .bind(&details.engine)
        .bind(details.mileage)
        .bind(details.model_year)
        .bind(details.production_year)
        .bind(&details.external_color)
        .bind(vehicle.location.lat)
        .bind(vehicle.location.lon)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, vehicle: &Vehicle) -> AppResult<SavedRow> {
        let details = &vehicle.details;
        let row = sqlx::query_as::<_, SavedRow>(
            r#"
            UPDATE vehicles
            SET condition = $2, body = $3, model = $4, manufacturer_code = $5, number_of_doors = $6,
                fuel_type = $7, engine = $8, mileage = $9, model_year = $10, production_year = $11,
                external_color = $12, latitude = $13, longitude = $14, modified_at = $15
            WHERE id = $1
            RETURNING id, created_at, modified_at
            "#,
        )
        .bind(id)
        .bind(vehicle.condition.as_str())
        .bind(&details.body)
        .bind(&details.model)
        .bind(details.manufacturer.code)
        .bind(details.number_of_doors)
        .bind(&details.fuel_type)
        .bind(&details.engine)
        .bind(details.mileage)
        .bind(details.model_year)
        .bind(details.production_year)
        .bind(&details.external_color)
        .bind(vehicle.location.lat)
        .bind(vehicle.location.lon)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        Ok(row)
    }
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!("{} ORDER BY v.id", SELECT_VEHICLES))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!("{} WHERE v.id = $1", SELECT_VEHICLES))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let saved = match vehicle.id {
            Some(id) => self.update(id, &vehicle).await?,
            None => self.insert(&vehicle).await?,
        };

        let mut stored = vehicle.persistable();
        stored.id = Some(saved.id);
        stored.created_at = Some(saved.created_at);
        stored.modified_at = Some(saved.modified_at);
        Ok(stored)
    }

    async fn delete(&self, vehicle: &Vehicle) -> AppResult<()> {
        let Some(id) = vehicle.id else {
            return Ok(());
        };

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[derive(Default)]
struct InMemoryVehicles {
    vehicles: BTreeMap<i64, Vehicle>,
    last_id: i64,
}

/// Almacén en memoria, usado cuando no hay DATABASE_URL y en tests
#[derive(Default)]
pub struct InMemoryVehicleRepository {
    inner: RwLock<InMemoryVehicles>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleRepository {
    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let inner = self.inner.read().await;
        Ok(inner.vehicles.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let inner = self.inner.read().await;
        Ok(inner.vehicles.get(&id).cloned())
    }

    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let mut stored = vehicle.persistable();

        match vehicle.id {
            Some(id) => {
                let existing = inner
                    .vehicles
                    .get(&id)
                    .ok_or_else(|| not_found_error("Car", &id.to_string()))?;
                stored.created_at = existing.created_at;
                stored.modified_at = Some(now);
            }
            None => {
                inner.last_id += 1;
                stored.id = Some(inner.last_id);
                stored.created_at = Some(now);
                stored.modified_at = Some(now);
            }
        }

        if let Some(id) = stored.id {
            inner.vehicles.insert(id, stored.clone());
        }
        Ok(stored)
    }

    async fn delete(&self, vehicle: &Vehicle) -> AppResult<()> {
        if let Some(id) = vehicle.id {
            self.inner.write().await.vehicles.remove(&id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle() -> Vehicle {
        Vehicle::new(
            Condition::New,
            Details {
                body: "sedan".to_string(),
                model: "A4".to_string(),
                manufacturer: Manufacturer::with_code(100, "Audi"),
                number_of_doors: Some(4),
                fuel_type: None,
                engine: None,
                mileage: Some(0),
                model_year: Some(2020),
                production_year: Some(2020),
                external_color: None,
            },
            Location::new(40.73, -73.99),
        )
    }

    #[tokio::test]
    async fn test_in_memory_insert_assigns_sequential_ids() {
        let repo = InMemoryVehicleRepository::new();

        let first = repo.save(sample_vehicle()).await.unwrap();
        let second = repo.save(sample_vehicle()).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(first.created_at.is_some());
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_in_memory_update_keeps_created_at() {
        let repo = InMemoryVehicleRepository::new();
        let created = repo.save(sample_vehicle()).await.unwrap();

        let mut changed = created.clone();
        changed.condition = Condition::Used;
        let updated = repo.save(changed).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.condition, Condition::Used);
    }

    #[tokio::test]
    async fn test_in_memory_update_of_missing_id_is_not_found() {
        let repo = InMemoryVehicleRepository::new();
        let mut vehicle = sample_vehicle();
        vehicle.id = Some(99);

        let result = repo.save(vehicle).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_in_memory_save_drops_derived_fields() {
        let repo = InMemoryVehicleRepository::new();
        let mut vehicle = sample_vehicle();
        vehicle.price = Some("USD 1.00".to_string());
        vehicle.location = vehicle.location.with_address("1 Main St", "Springfield", "IL", "62701");

        let saved = repo.save(vehicle).await.unwrap();
        let stored = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();

        assert!(stored.price.is_none());
        assert!(stored.location.address.is_none());
    }

    #[tokio::test]
    async fn test_in_memory_delete() {
        let repo = InMemoryVehicleRepository::new();
        let saved = repo.save(sample_vehicle()).await.unwrap();

        repo.delete(&saved).await.unwrap();
        assert!(repo.find_by_id(saved.id.unwrap()).await.unwrap().is_none());
    }
}
