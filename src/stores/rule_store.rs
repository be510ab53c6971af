//! Store de reglas de mantenimiento
//!
//! Acceso tipado a la tabla `maintenance_items`. Las reglas solo se mutan
//! desde el registro de logs (campos last_done); no existe update general.

use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::client::{eq, TableClient};
use crate::models::maintenance_rule::{CreateRuleRequest, MaintenanceRule};
use crate::utils::errors::AppError;

const TABLE: &str = "maintenance_items";

pub struct RuleStore {
    client: Arc<TableClient>,
}

impl RuleStore {
    pub fn new(client: Arc<TableClient>) -> Self {
        Self { client }
    }

    /// Reglas de un vehículo, ordenadas por nombre
    pub async fn list(
        &self,
        token: &str,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceRule>, AppError> {
        self.client
            .select(
                token,
                TABLE,
                &[("vehicle_id", eq(vehicle_id))],
                Some("name.asc"),
            )
            .await
    }

    pub async fn create(
        &self,
        token: &str,
        request: &CreateRuleRequest,
    ) -> Result<MaintenanceRule, AppError> {
        let body = json!({
            "vehicle_id": request.vehicle_id,
            "name": request.name,
            "interval_km": request.interval_km,
            "interval_months": request.interval_months,
        });

        self.client.insert(token, TABLE, &body).await
    }

    /// Sobrescribir los campos last_done con los valores de un log de
    /// mantenimiento. Sin comprobación de avance: el log manda.
    pub async fn update_last_done(
        &self,
        token: &str,
        rule_id: Uuid,
        done_at: NaiveDate,
        mileage: i64,
    ) -> Result<(), AppError> {
        self.client
            .update(
                token,
                TABLE,
                &[("id", eq(rule_id))],
                &json!({
                    "last_done_date": done_at,
                    "last_done_mileage": mileage,
                }),
            )
            .await
    }

    pub async fn delete(&self, token: &str, id: Uuid) -> Result<(), AppError> {
        self.client.delete(token, TABLE, &[("id", eq(id))]).await
    }
}
