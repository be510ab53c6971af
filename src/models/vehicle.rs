//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente a la tabla `vehicles` del backend alojado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Kilometraje diario estimado por defecto
pub const DEFAULT_DAILY_AVG_KM: f64 = 30.0;

fn default_daily_avg() -> f64 {
    DEFAULT_DAILY_AVG_KM
}

/// Vehicle principal - mapea exactamente a la fila de la tabla `vehicles`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Apodo del vehículo ("coche del trabajo")
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: Option<String>,
    /// Lectura actual del odómetro en km. Se espera creciente pero no se fuerza.
    pub current_mileage: i64,
    #[serde(default = "default_daily_avg")]
    pub daily_avg_km: f64,
    pub created_at: DateTime<Utc>,
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 2, max = 20))]
    pub license_plate: Option<String>,

    #[validate(range(min = 0))]
    pub current_mileage: i64,

    #[validate(range(min = 0.0))]
    pub daily_avg_km: Option<f64>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 2, max = 20))]
    pub license_plate: Option<String>,

    #[validate(range(min = 0))]
    pub current_mileage: Option<i64>,

    #[validate(range(min = 0.0))]
    pub daily_avg_km: Option<f64>,
}

impl UpdateVehicleRequest {
    /// Un update sin ningún campo no tiene nada que enviar al backend
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.make.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.license_plate.is_none()
            && self.current_mileage.is_none()
            && self.daily_avg_km.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_negative_mileage() {
        let request = CreateVehicleRequest {
            name: "Daily driver".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2021,
            license_plate: None,
            current_mileage: -5,
            daily_avg_km: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_is_empty() {
        let request = UpdateVehicleRequest::default();
        assert!(request.is_empty());

        let request = UpdateVehicleRequest {
            current_mileage: Some(50000),
            ..Default::default()
        };
        assert!(!request.is_empty());
    }

    #[test]
    fn test_vehicle_row_without_daily_avg_uses_default() {
        let row = serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "user_id": "550e8400-e29b-41d4-a716-446655440001",
            "name": "Family car",
            "make": "Honda",
            "model": "CR-V",
            "year": 2019,
            "license_plate": null,
            "current_mileage": 61234,
            "created_at": "2024-03-01T09:30:00Z"
        });
        let vehicle: Vehicle = serde_json::from_value(row).unwrap();
        assert_eq!(vehicle.daily_avg_km, DEFAULT_DAILY_AVG_KM);
    }
}
