//! Controller de reglas de mantenimiento

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::client::TableClient;
use crate::data::presets::find_preset;
use crate::models::maintenance_rule::{CreateRuleRequest, MaintenanceRule};
use crate::stores::rule_store::RuleStore;
use crate::utils::errors::AppError;

pub struct RuleController {
    rules: RuleStore,
}

impl RuleController {
    pub fn new(client: Arc<TableClient>) -> Self {
        Self {
            rules: RuleStore::new(client),
        }
    }

    pub async fn list(
        &self,
        token: &str,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceRule>, AppError> {
        self.rules.list(token, vehicle_id).await
    }

    pub async fn create(
        &self,
        token: &str,
        request: CreateRuleRequest,
    ) -> Result<MaintenanceRule, AppError> {
        request.validate()?;
        self.rules.create(token, &request).await
    }

    /// Crear una regla a partir de una plantilla del catálogo
    pub async fn create_from_preset(
        &self,
        token: &str,
        vehicle_id: Uuid,
        preset_name: &str,
    ) -> Result<MaintenanceRule, AppError> {
        let preset = find_preset(preset_name).ok_or_else(|| {
            AppError::NotFound(format!("plantilla '{}' no encontrada", preset_name))
        })?;

        let request = CreateRuleRequest {
            vehicle_id,
            name: preset.name.to_string(),
            interval_km: preset.interval_km,
            interval_months: preset.interval_months,
        };
        self.create(token, request).await
    }

    pub async fn delete(&self, token: &str, id: Uuid) -> Result<(), AppError> {
        self.rules.delete(token, id).await
    }
}
