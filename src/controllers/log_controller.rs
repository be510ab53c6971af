//! Controller de registros de mantenimiento
//!
//! Además del alta del registro, aplica el efecto cruzado sobre la regla
//! cumplida: un log de tipo `maintenance` asociado a una regla sobrescribe los
//! campos last_done de esa regla con los valores del log.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::client::TableClient;
use crate::models::maintenance_log::{CreateLogRequest, LogType, MaintenanceLog};
use crate::stores::log_store::LogStore;
use crate::stores::rule_store::RuleStore;
use crate::utils::errors::AppError;

/// Escritura pendiente sobre la regla cumplida por un log
#[derive(Debug, PartialEq, Eq)]
pub struct RuleLastDoneUpdate {
    pub rule_id: Uuid,
    pub done_at: NaiveDate,
    pub mileage: i64,
}

/// Decidir si un log debe actualizar una regla y con qué valores.
///
/// Solo los logs de tipo `maintenance` con regla asociada producen escritura;
/// los valores del log mandan sin comprobar que avancen sobre los anteriores.
pub fn rule_update_for_log(
    log: &MaintenanceLog,
    related_rule_id: Option<Uuid>,
) -> Option<RuleLastDoneUpdate> {
    let rule_id = related_rule_id?;
    if log.log_type != LogType::Maintenance {
        return None;
    }
    Some(RuleLastDoneUpdate {
        rule_id,
        done_at: log.done_at,
        mileage: log.mileage,
    })
}

pub struct LogController {
    logs: LogStore,
    rules: RuleStore,
}

impl LogController {
    pub fn new(client: Arc<TableClient>) -> Self {
        Self {
            logs: LogStore::new(client.clone()),
            rules: RuleStore::new(client),
        }
    }

    pub async fn list(
        &self,
        token: &str,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceLog>, AppError> {
        self.logs.list(token, vehicle_id).await
    }

    /// Registrar un evento y, si procede, actualizar la regla cumplida.
    ///
    /// Si la actualización de la regla falla con el log ya escrito, el fallo
    /// se registra y el log se devuelve igualmente: se prefiere no perder el
    /// apunte del usuario a la consistencia estricta. Regla y logs pueden
    /// divergir transitoriamente.
    pub async fn record(
        &self,
        token: &str,
        request: CreateLogRequest,
        related_rule_id: Option<Uuid>,
    ) -> Result<MaintenanceLog, AppError> {
        request.validate()?;
        let log = self.logs.create(token, &request).await?;

        if let Some(update) = rule_update_for_log(&log, related_rule_id) {
            if let Err(e) = self
                .rules
                .update_last_done(token, update.rule_id, update.done_at, update.mileage)
                .await
            {
                warn!(
                    "log {} guardado pero la regla {} no se pudo actualizar: {}",
                    log.id, update.rule_id, e
                );
            }
        }

        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn log(log_type: LogType) -> MaintenanceLog {
        MaintenanceLog {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            item_name: "Cambio de aceite".to_string(),
            log_type,
            mileage: 50230,
            cost: None,
            notes: None,
            done_at: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            created_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_maintenance_log_with_rule_updates_last_done_exactly() {
        let log = log(LogType::Maintenance);
        let rule_id = Uuid::new_v4();

        let update = rule_update_for_log(&log, Some(rule_id)).unwrap();
        assert_eq!(update.rule_id, rule_id);
        assert_eq!(update.done_at, log.done_at);
        assert_eq!(update.mileage, log.mileage);
    }

    #[test]
    fn test_repair_log_never_updates_rules() {
        let log = log(LogType::Repair);
        assert!(rule_update_for_log(&log, Some(Uuid::new_v4())).is_none());
    }

    #[test]
    fn test_log_without_rule_reference_updates_nothing() {
        let log = log(LogType::Maintenance);
        assert!(rule_update_for_log(&log, None).is_none());
    }
}
