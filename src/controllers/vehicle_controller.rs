use std::sync::Arc;
use validator::Validate;

use crate::dto::{ApiResponse, VehicleRequest};
use crate::models::Vehicle;
use crate::services::VehicleService;
use crate::utils::errors::AppError;

pub struct VehicleController {
    service: Arc<VehicleService>,
}

impl VehicleController {
    pub fn new(service: Arc<VehicleService>) -> Self {
        Self { service }
    }

    pub async fn create(&self, request: VehicleRequest) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let vehicle = self.service.save(request.into_vehicle(None)).await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Vehicle, AppError> {
        self.service.find_by_id(id).await
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        self.service.list().await
    }

    pub async fn update(&self, id: i64, request: VehicleRequest) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let vehicle = self.service.save(request.into_vehicle(Some(id))).await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.service.delete(id).await
    }
}
