//! Store de vehículos
//!
//! Acceso tipado a la tabla `vehicles` del backend alojado. La visibilidad por
//! propietario la impone el backend (row-level auth); el borrado cascada sobre
//! reglas y logs también es suyo.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::client::{eq, TableClient};
use crate::models::vehicle::{
    CreateVehicleRequest, UpdateVehicleRequest, Vehicle, DEFAULT_DAILY_AVG_KM,
};
use crate::utils::errors::AppError;

const TABLE: &str = "vehicles";

pub struct VehicleStore {
    client: Arc<TableClient>,
}

impl VehicleStore {
    pub fn new(client: Arc<TableClient>) -> Self {
        Self { client }
    }

    /// Vehículos del usuario actual, más recientes primero
    pub async fn list(&self, token: &str) -> Result<Vec<Vehicle>, AppError> {
        self.client
            .select(token, TABLE, &[], Some("created_at.desc"))
            .await
    }

    pub async fn get(&self, token: &str, id: Uuid) -> Result<Vehicle, AppError> {
        let mut rows: Vec<Vehicle> = self
            .client
            .select(token, TABLE, &[("id", eq(id))], None)
            .await?;

        if rows.is_empty() {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }
        Ok(rows.remove(0))
    }

    pub async fn create(
        &self,
        token: &str,
        owner: Uuid,
        request: &CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let body = json!({
            "user_id": owner,
            "name": request.name,
            "make": request.make,
            "model": request.model,
            "year": request.year,
            "license_plate": request.license_plate,
            "current_mileage": request.current_mileage,
            "daily_avg_km": request.daily_avg_km.unwrap_or(DEFAULT_DAILY_AVG_KM),
        });

        self.client.insert(token, TABLE, &body).await
    }

    /// Actualización parcial; solo se envían los campos presentes
    pub async fn update(
        &self,
        token: &str,
        id: Uuid,
        request: &UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let mut body = serde_json::Map::new();
        if let Some(name) = &request.name {
            body.insert("name".to_string(), json!(name));
        }
        if let Some(make) = &request.make {
            body.insert("make".to_string(), json!(make));
        }
        if let Some(model) = &request.model {
            body.insert("model".to_string(), json!(model));
        }
        if let Some(year) = request.year {
            body.insert("year".to_string(), json!(year));
        }
        if let Some(license_plate) = &request.license_plate {
            body.insert("license_plate".to_string(), json!(license_plate));
        }
        if let Some(current_mileage) = request.current_mileage {
            body.insert("current_mileage".to_string(), json!(current_mileage));
        }
        if let Some(daily_avg_km) = request.daily_avg_km {
            body.insert("daily_avg_km".to_string(), json!(daily_avg_km));
        }

        self.client
            .update(token, TABLE, &[("id", eq(id))], &body.into())
            .await?;
        self.get(token, id).await
    }

    pub async fn update_mileage(
        &self,
        token: &str,
        id: Uuid,
        current_mileage: i64,
    ) -> Result<(), AppError> {
        self.client
            .update(
                token,
                TABLE,
                &[("id", eq(id))],
                &json!({ "current_mileage": current_mileage }),
            )
            .await
    }

    /// El backend cascada el borrado a reglas y logs del vehículo
    pub async fn delete(&self, token: &str, id: Uuid) -> Result<(), AppError> {
        self.client.delete(token, TABLE, &[("id", eq(id))]).await
    }
}
