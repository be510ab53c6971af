//! Controller de vehículos
//!
//! Orquesta las operaciones CRUD de vehículos contra el store remoto y aplica
//! las plantillas de mantenimiento por defecto al crear un vehículo nuevo.

use chrono::NaiveDate;
use futures::try_join;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::client::TableClient;
use crate::data::presets::default_presets;
use crate::models::maintenance_log::MaintenanceLog;
use crate::models::maintenance_rule::{CreateRuleRequest, MaintenanceRule};
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle};
use crate::services::maintenance_status_service::{
    calculate_maintenance_status, MaintenanceStatus,
};
use crate::stores::log_store::LogStore;
use crate::stores::rule_store::RuleStore;
use crate::stores::vehicle_store::VehicleStore;
use crate::utils::errors::AppError;

/// Una regla junto a su estado calculado
pub struct RuleWithStatus {
    pub rule: MaintenanceRule,
    pub status: MaintenanceStatus,
}

/// Vista completa de un vehículo: ficha, reglas evaluadas y últimos registros
pub struct VehicleDetail {
    pub vehicle: Vehicle,
    pub rules: Vec<RuleWithStatus>,
    pub logs: Vec<MaintenanceLog>,
}

pub struct VehicleController {
    vehicles: VehicleStore,
    rules: RuleStore,
    logs: LogStore,
}

impl VehicleController {
    pub fn new(client: Arc<TableClient>) -> Self {
        Self {
            vehicles: VehicleStore::new(client.clone()),
            rules: RuleStore::new(client.clone()),
            logs: LogStore::new(client),
        }
    }

    /// Crear un vehículo y, opcionalmente, sus reglas por defecto. El fallo de
    /// una plantilla individual no deshace la creación del vehículo.
    pub async fn create(
        &self,
        token: &str,
        owner: Uuid,
        request: CreateVehicleRequest,
        with_presets: bool,
    ) -> Result<Vehicle, AppError> {
        request.validate()?;
        let vehicle = self.vehicles.create(token, owner, &request).await?;

        if with_presets {
            // Secuencial a propósito: el backend no coordina escritores
            for preset in default_presets() {
                let rule_request = CreateRuleRequest {
                    vehicle_id: vehicle.id,
                    name: preset.name.to_string(),
                    interval_km: preset.interval_km,
                    interval_months: preset.interval_months,
                };
                if let Err(e) = self.rules.create(token, &rule_request).await {
                    warn!("no se pudo crear la regla '{}': {}", preset.name, e);
                }
            }
        }

        Ok(vehicle)
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Vehicle>, AppError> {
        self.vehicles.list(token).await
    }

    /// Ficha completa del vehículo. Las tres lecturas son independientes y se
    /// lanzan a la vez; cada regla pasa por el evaluador de estado.
    pub async fn detail(
        &self,
        token: &str,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<VehicleDetail, AppError> {
        let (vehicle, rules, logs) = try_join!(
            self.vehicles.get(token, id),
            self.rules.list(token, id),
            self.logs.list(token, id),
        )?;

        let rules = rules
            .into_iter()
            .map(|rule| {
                let status = calculate_maintenance_status(
                    &rule,
                    vehicle.current_mileage,
                    vehicle.daily_avg_km,
                    today,
                );
                RuleWithStatus { rule, status }
            })
            .collect();

        Ok(VehicleDetail {
            vehicle,
            rules,
            logs,
        })
    }

    pub async fn update(
        &self,
        token: &str,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        request.validate()?;
        if request.is_empty() {
            return Err(AppError::BadRequest(
                "nada que actualizar: indica al menos un campo".to_string(),
            ));
        }
        self.vehicles.update(token, id, &request).await
    }

    /// Actualizar el odómetro. Una lectura menor que la actual se acepta con
    /// aviso: el odómetro se espera creciente pero no se fuerza.
    pub async fn update_mileage(
        &self,
        token: &str,
        id: Uuid,
        new_mileage: i64,
    ) -> Result<Vehicle, AppError> {
        if new_mileage < 0 {
            return Err(AppError::BadRequest(
                "el kilometraje no puede ser negativo".to_string(),
            ));
        }

        let vehicle = self.vehicles.get(token, id).await?;
        if new_mileage < vehicle.current_mileage {
            warn!(
                "odómetro hacia atrás en '{}': {} -> {} km",
                vehicle.name, vehicle.current_mileage, new_mileage
            );
        }

        self.vehicles.update_mileage(token, id, new_mileage).await?;
        self.vehicles.get(token, id).await
    }

    /// Borrar un vehículo; el backend cascada reglas y registros
    pub async fn delete(&self, token: &str, id: Uuid) -> Result<(), AppError> {
        self.vehicles.delete(token, id).await
    }
}
