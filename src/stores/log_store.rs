//! Store de registros de mantenimiento
//!
//! Acceso tipado a la tabla `maintenance_logs`. Los registros son inmutables:
//! solo existen list y create.

use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::client::{eq, TableClient};
use crate::models::maintenance_log::{CreateLogRequest, MaintenanceLog};
use crate::utils::errors::AppError;

const TABLE: &str = "maintenance_logs";

pub struct LogStore {
    client: Arc<TableClient>,
}

impl LogStore {
    pub fn new(client: Arc<TableClient>) -> Self {
        Self { client }
    }

    /// Registros de un vehículo, más recientes primero
    pub async fn list(
        &self,
        token: &str,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceLog>, AppError> {
        self.client
            .select(
                token,
                TABLE,
                &[("vehicle_id", eq(vehicle_id))],
                Some("done_at.desc"),
            )
            .await
    }

    pub async fn create(
        &self,
        token: &str,
        request: &CreateLogRequest,
    ) -> Result<MaintenanceLog, AppError> {
        let body = json!({
            "vehicle_id": request.vehicle_id,
            "item_name": request.item_name,
            "log_type": request.log_type,
            "mileage": request.mileage,
            "cost": request.cost.unwrap_or(Decimal::ZERO),
            "notes": request.notes,
            "done_at": request.done_at,
        });

        self.client.insert(token, TABLE, &body).await
    }
}
