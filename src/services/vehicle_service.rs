//! Servicio de vehículos
//!
//! Compone los almacenes de vehículos y fabricantes con los clientes de
//! precio y mapas: crea, lee, actualiza y borra vehículos, y enriquece las
//! lecturas individuales con precio y dirección.

use std::sync::Arc;

use crate::clients::{LocationLookup, PriceLookup};
use crate::models::{Manufacturer, Vehicle};
use crate::repositories::{ManufacturerStore, VehicleStore};
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};

pub struct VehicleService {
    vehicles: Arc<dyn VehicleStore>,
    manufacturers: Arc<dyn ManufacturerStore>,
    prices: Arc<dyn PriceLookup>,
    maps: Arc<dyn LocationLookup>,
}

impl VehicleService {
    pub fn new(
        vehicles: Arc<dyn VehicleStore>,
        manufacturers: Arc<dyn ManufacturerStore>,
        prices: Arc<dyn PriceLookup>,
        maps: Arc<dyn LocationLookup>,
    ) -> Self {
        Self {
            vehicles,
            manufacturers,
            prices,
            maps,
        }
    }

    /// Todos los vehículos guardados, sin enriquecer
    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        self.vehicles.find_all().await
    }

    /// Vehículo por id con precio y dirección recién consultados.
    /// Los fallos de los clientes externos se propagan tal cual.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Vehicle> {
        let mut vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        vehicle.price = Some(self.prices.get_price(id).await?);
        vehicle.location = self.maps.get_address(&vehicle.location).await?;

        Ok(vehicle)
    }

    /// Crea o actualiza según tenga id. En la actualización solo cambian
    /// condición, detalles y ubicación. El fabricante siempre queda como el
    /// registro guardado, nunca como lo manda el cliente.
    pub async fn save(&self, mut vehicle: Vehicle) -> AppResult<Vehicle> {
        vehicle.details.manufacturer = self.resolve_manufacturer(&vehicle.details.manufacturer).await?;

        let Some(id) = vehicle.id else {
            let saved = self.vehicles.save(vehicle).await?;
            log::info!("🚗 Vehículo creado con id {:?}", saved.id);
            return Ok(saved);
        };

        let mut existing = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        existing.condition = vehicle.condition;
        existing.details = vehicle.details;
        existing.location = vehicle.location;

        let saved = self.vehicles.save(existing).await?;
        log::info!("🚗 Vehículo {} actualizado", id);
        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        self.vehicles.delete(&vehicle).await?;
        log::info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }

    /// Con código: el fabricante guardado con ese código (BadRequest si no
    /// existe). Sin código: ver `ensure_manufacturer`.
    async fn resolve_manufacturer(&self, manufacturer: &Manufacturer) -> AppResult<Manufacturer> {
        let Some(code) = manufacturer.code else {
            return self.ensure_manufacturer(manufacturer).await;
        };

        self.manufacturers.find_by_code(code).await?.ok_or_else(|| {
            log::warn!("⚠️ Código de fabricante desconocido: {}", code);
            bad_request_error(&format!("Unknown manufacturer code {}", code))
        })
    }

    /// Fabricante existente con ese nombre, o uno nuevo con código generado
    async fn ensure_manufacturer(&self, manufacturer: &Manufacturer) -> AppResult<Manufacturer> {
        if let Some(existing) = self.manufacturers.find_by_name(&manufacturer.name).await? {
            return Ok(existing);
        }

        self.manufacturers
            .save(Manufacturer::new(manufacturer.name.clone()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, Details, Location};
    use crate::repositories::{InMemoryManufacturerRepository, InMemoryVehicleRepository};
    use crate::utils::errors::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPrices {
        price: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceLookup for StubPrices {
        async fn get_price(&self, _vehicle_id: i64) -> AppResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.price.clone())
        }
    }

    struct StubMaps {
        location: Location,
    }

    #[async_trait]
    impl LocationLookup for StubMaps {
        async fn get_address(&self, _location: &Location) -> AppResult<Location> {
            Ok(self.location.clone())
        }
    }

    struct FailingPrices;

    #[async_trait]
    impl PriceLookup for FailingPrices {
        async fn get_price(&self, _vehicle_id: i64) -> AppResult<String> {
            Err(AppError::ExternalApi("connection refused".to_string()))
        }
    }

    struct Fixture {
        service: VehicleService,
        vehicles: Arc<InMemoryVehicleRepository>,
        manufacturers: Arc<InMemoryManufacturerRepository>,
        prices: Arc<StubPrices>,
    }

    fn fixture() -> Fixture {
        let vehicles = Arc::new(InMemoryVehicleRepository::new());
        let manufacturers = Arc::new(InMemoryManufacturerRepository::with_defaults());
        let prices = Arc::new(StubPrices {
            price: "abc".to_string(),
            calls: AtomicUsize::new(0),
        });
        let maps = Arc::new(StubMaps {
            location: Location::new(10.0, -10.0).with_address("123 Main St", "Springfield", "IL", "62701"),
        });

        let service = VehicleService::new(vehicles.clone(), manufacturers.clone(), prices.clone(), maps);
        Fixture {
            service,
            vehicles,
            manufacturers,
            prices,
        }
    }

    fn car(condition: Condition, manufacturer: Manufacturer) -> Vehicle {
        Vehicle::new(
            condition,
            Details {
                body: "sedan".to_string(),
                model: "Impala".to_string(),
                manufacturer,
                number_of_doors: Some(4),
                fuel_type: Some("Gasoline".to_string()),
                engine: Some("3.6L V6".to_string()),
                mileage: Some(32280),
                model_year: Some(2018),
                production_year: Some(2018),
                external_color: Some("white".to_string()),
            },
            Location::new(40.730610, -73.935242),
        )
    }

    #[tokio::test]
    async fn test_find_by_id_enriches_with_price_and_address() {
        let f = fixture();
        let saved = f
            .service
            .save(car(Condition::Used, Manufacturer::with_code(101, "Chevrolet")))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(1));

        let found = f.service.find_by_id(1).await.unwrap();

        assert_eq!(found.id, Some(1));
        assert_eq!(found.condition, Condition::Used);
        assert_eq!(found.price.as_deref(), Some("abc"));
        assert_eq!(found.location.lat, 10.0);
        assert_eq!(found.location.lon, -10.0);
        assert_eq!(found.location.address.as_deref(), Some("123 Main St"));
    }

    #[tokio::test]
    async fn test_find_by_id_ignores_values_sent_on_save() {
        let f = fixture();
        let mut vehicle = car(Condition::New, Manufacturer::with_code(100, "Audi"));
        vehicle.price = Some("USD 1.00".to_string());
        vehicle.location = vehicle.location.with_address("Old Road 9", "Nowhere", "ZZ", "00000");
        let saved = f.service.save(vehicle).await.unwrap();

        let found = f.service.find_by_id(saved.id.unwrap()).await.unwrap();

        assert_eq!(found.price.as_deref(), Some("abc"));
        assert_eq!(found.location.address.as_deref(), Some("123 Main St"));
    }

    #[tokio::test]
    async fn test_list_is_not_enriched() {
        let f = fixture();
        f.service
            .save(car(Condition::New, Manufacturer::with_code(100, "Audi")))
            .await
            .unwrap();
        f.service
            .save(car(Condition::Used, Manufacturer::with_code(102, "Ford")))
            .await
            .unwrap();

        let vehicles = f.service.list().await.unwrap();

        assert_eq!(vehicles.len(), 2);
        assert!(vehicles.iter().all(|v| v.price.is_none() && v.location.address.is_none()));
        assert_eq!(f.prices.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let f = fixture();

        assert!(matches!(f.service.find_by_id(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(f.service.delete(42).await, Err(AppError::NotFound(_))));

        let mut update = car(Condition::Used, Manufacturer::with_code(101, "Chevrolet"));
        update.id = Some(42);
        assert!(matches!(f.service.save(update).await, Err(AppError::NotFound(_))));
        assert!(f.vehicles.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_new_manufacturer_creates_exactly_one_record() {
        let f = fixture();
        let before = f.manufacturers.len().await;

        let saved = f
            .service
            .save(car(Condition::New, Manufacturer::new("Tesla")))
            .await
            .unwrap();

        assert_eq!(f.manufacturers.len().await, before + 1);
        let code = saved.details.manufacturer.code.expect("manufacturer code assigned");
        let stored = f.manufacturers.find_by_name("Tesla").await.unwrap().unwrap();
        assert_eq!(stored.code, Some(code));

        let stored_vehicle = f.vehicles.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored_vehicle.details.manufacturer.code, Some(code));
    }

    #[tokio::test]
    async fn test_save_reuses_manufacturer_with_same_name() {
        let f = fixture();
        let before = f.manufacturers.len().await;

        let saved = f
            .service
            .save(car(Condition::New, Manufacturer::new("ford")))
            .await
            .unwrap();

        assert_eq!(f.manufacturers.len().await, before);
        assert_eq!(saved.details.manufacturer, Manufacturer::with_code(102, "Ford"));
    }

    #[tokio::test]
    async fn test_manufacturer_code_wins_over_sent_name() {
        let f = fixture();
        let before = f.manufacturers.len().await;

        let saved = f
            .service
            .save(car(Condition::New, Manufacturer::with_code(101, "Audi")))
            .await
            .unwrap();
        assert_eq!(saved.details.manufacturer, Manufacturer::with_code(101, "Chevrolet"));

        let found = f.service.find_by_id(saved.id.unwrap()).await.unwrap();
        assert_eq!(found.details.manufacturer, Manufacturer::with_code(101, "Chevrolet"));
        assert_eq!(f.manufacturers.len().await, before);
    }

    #[tokio::test]
    async fn test_unknown_manufacturer_code_is_rejected() {
        let f = fixture();

        let result = f
            .service
            .save(car(Condition::New, Manufacturer::with_code(999, "Ghost")))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(f.vehicles.find_all().await.unwrap().is_empty());
        assert!(f.manufacturers.find_by_code(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_applies_input() {
        let f = fixture();
        let created = f
            .service
            .save(car(Condition::New, Manufacturer::with_code(100, "Audi")))
            .await
            .unwrap();

        let mut update = car(Condition::Used, Manufacturer::with_code(103, "BMW"));
        update.id = created.id;
        update.details.model = "X5".to_string();
        update.location = Location::new(1.5, 2.5);
        let updated = f.service.save(update).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.condition, Condition::Used);
        assert_eq!(updated.details.model, "X5");
        assert_eq!(updated.details.manufacturer.name, "BMW");
        assert_eq!(updated.location, Location::new(1.5, 2.5));
        assert_eq!(f.vehicles.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_find_is_not_found() {
        let f = fixture();
        let created = f
            .service
            .save(car(Condition::New, Manufacturer::with_code(104, "Dodge")))
            .await
            .unwrap();
        let id = created.id.unwrap();

        f.service.delete(id).await.unwrap();

        assert!(matches!(f.service.find_by_id(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_price_failure_propagates() {
        let vehicles = Arc::new(InMemoryVehicleRepository::new());
        let service = VehicleService::new(
            vehicles.clone(),
            Arc::new(InMemoryManufacturerRepository::with_defaults()),
            Arc::new(FailingPrices),
            Arc::new(StubMaps {
                location: Location::new(0.0, 0.0),
            }),
        );
        let saved = service
            .save(car(Condition::New, Manufacturer::with_code(100, "Audi")))
            .await
            .unwrap();

        let result = service.find_by_id(saved.id.unwrap()).await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
