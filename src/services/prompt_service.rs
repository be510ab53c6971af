//! Aviso diario de kilometraje
//!
//! Una vez por día de calendario se recuerda al usuario actualizar el odómetro
//! de su vehículo. El estado es una única clave persistida en el dispositivo:
//! la fecha del último aviso (`YYYY-MM-DD`). Se lee antes de decidir avisar y
//! se escribe tras mostrar u omitir el aviso; sin protección de concurrencia
//! (un solo usuario, un solo dispositivo).

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

pub struct PromptService {
    marker_path: PathBuf,
}

impl PromptService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            marker_path: config.prompt_marker_path(),
        }
    }

    /// ¿Toca avisar hoy? Cierto mientras el marcador no sea la fecha de hoy.
    pub fn should_prompt(&self, today: NaiveDate) -> bool {
        match fs::read_to_string(&self.marker_path) {
            Ok(raw) => match raw.trim().parse::<NaiveDate>() {
                Ok(marked) => marked != today,
                Err(e) => {
                    warn!("marcador de aviso ilegible, se reinicia: {}", e);
                    true
                }
            },
            Err(_) => true,
        }
    }

    /// Registrar que el aviso de hoy ya se mostró (u omitió)
    pub fn mark_prompted(&self, today: NaiveDate) -> Result<(), AppError> {
        if let Some(parent) = self.marker_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.marker_path, today.format("%Y-%m-%d").to_string())?;
        Ok(())
    }
}
