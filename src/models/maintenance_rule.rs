//! Modelo de MaintenanceRule
//!
//! Una regla de mantenimiento recurrente de un vehículo, definida por
//! intervalo de distancia y/o de tiempo. Mapea a la tabla `maintenance_items`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Regla de mantenimiento - fila de la tabla `maintenance_items`
///
/// Una regla con ambos intervalos en `None` nunca vence; el evaluador de
/// estado la trata como degenerada sin fallar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRule {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub name: String,
    /// Intervalo en km; `None` = la regla no se evalúa por distancia
    pub interval_km: Option<i64>,
    /// Intervalo en meses de calendario; `None` = no se evalúa por tiempo
    pub interval_months: Option<u32>,
    /// Fecha del último cumplimiento; `None` si nunca se ha hecho
    pub last_done_date: Option<NaiveDate>,
    /// Odómetro del último cumplimiento; se trata como 0 si nunca se ha hecho
    pub last_done_mileage: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Request para crear una regla de mantenimiento
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRuleRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(range(min = 1))]
    pub interval_km: Option<i64>,

    #[validate(range(min = 1))]
    pub interval_months: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_create_request_rejects_zero_intervals() {
        let request = CreateRuleRequest {
            vehicle_id: Uuid::new_v4(),
            name: "Cambio de aceite".to_string(),
            interval_km: Some(0),
            interval_months: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_allows_missing_intervals() {
        // Degenerada pero válida: el evaluador la resuelve como nunca-vence
        let request = CreateRuleRequest {
            vehicle_id: Uuid::new_v4(),
            name: "Inspección visual".to_string(),
            interval_km: None,
            interval_months: None,
        };
        assert!(request.validate().is_ok());
    }
}
