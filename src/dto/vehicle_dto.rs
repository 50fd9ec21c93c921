use serde::Deserialize;
use validator::Validate;

use crate::models::{Condition, Details, Location, Vehicle};

// Request para crear o actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleRequest {
    pub condition: Condition,

    #[validate]
    pub details: Details,

    #[validate]
    pub location: Location,
}

impl VehicleRequest {
    /// Vehículo de dominio; `id` viene del path en las actualizaciones
    pub fn into_vehicle(self, id: Option<i64>) -> Vehicle {
        let mut vehicle = Vehicle::new(self.condition, self.details, self.location);
        vehicle.id = id;
        vehicle
    }
}
