//! Modelo de MaintenanceLog
//!
//! Registro inmutable de un evento de mantenimiento o reparación completado.
//! Mapea a la tabla `maintenance_logs`. No existe update ni delete.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Tipo de evento registrado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    /// Mantenimiento regular: puede cumplir una regla (ver side effect en el
    /// controller de logs)
    Maintenance,
    /// Reparación puntual: nunca muta reglas
    Repair,
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogType::Maintenance => write!(f, "maintenance"),
            LogType::Repair => write!(f, "repair"),
        }
    }
}

impl std::str::FromStr for LogType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maintenance" => Ok(LogType::Maintenance),
            "repair" => Ok(LogType::Repair),
            other => Err(format!(
                "tipo de registro desconocido '{}' (maintenance | repair)",
                other
            )),
        }
    }
}

/// Registro de mantenimiento - fila de la tabla `maintenance_logs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub item_name: String,
    pub log_type: LogType,
    /// Odómetro en el momento del evento
    pub mileage: i64,
    #[serde(default)]
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
    /// Fecha en la que se realizó el trabajo
    pub done_at: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Request para registrar un evento de mantenimiento/reparación
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLogRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 100))]
    pub item_name: String,

    pub log_type: LogType,

    #[validate(range(min = 0))]
    pub mileage: i64,

    #[validate(custom = "validate_cost")]
    pub cost: Option<Decimal>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,

    pub done_at: NaiveDate,
}

fn validate_cost(cost: &Decimal) -> Result<(), validator::ValidationError> {
    if cost.is_sign_negative() {
        return Err(validator::ValidationError::new("non_negative_cost"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn base_request() -> CreateLogRequest {
        CreateLogRequest {
            vehicle_id: Uuid::new_v4(),
            item_name: "Cambio de aceite".to_string(),
            log_type: LogType::Maintenance,
            mileage: 50000,
            cost: None,
            notes: None,
            done_at: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        }
    }

    #[test]
    fn test_log_type_round_trip() {
        assert_eq!("maintenance".parse::<LogType>().unwrap(), LogType::Maintenance);
        assert_eq!("repair".parse::<LogType>().unwrap(), LogType::Repair);
        assert!("service".parse::<LogType>().is_err());

        let json = serde_json::to_string(&LogType::Repair).unwrap();
        assert_eq!(json, "\"repair\"");
    }

    #[test]
    fn test_create_request_rejects_negative_cost() {
        let mut request = base_request();
        request.cost = Some(Decimal::new(-100, 0));
        assert!(request.validate().is_err());

        request.cost = Some(Decimal::new(35050, 2));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_negative_mileage() {
        let mut request = base_request();
        request.mileage = -1;
        assert!(request.validate().is_err());
    }
}
