//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: URL y clave pública del
//! backend alojado, y el directorio local de datos del dispositivo.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// URL base del backend alojado (sin barra final)
    pub backend_url: String,
    /// Clave pública (anon key) que acompaña a toda petición
    pub backend_api_key: String,
    /// Directorio local para la sesión y el marcador de aviso diario
    pub data_dir: PathBuf,
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        let backend_url = env::var("AUTOKEEP_BACKEND_URL")
            .context("AUTOKEEP_BACKEND_URL must be set")?
            .trim_end_matches('/')
            .to_string();

        let backend_api_key =
            env::var("AUTOKEEP_API_KEY").context("AUTOKEEP_API_KEY must be set")?;

        let data_dir = match env::var("AUTOKEEP_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_dir()
                .context("no data directory available on this platform")?
                .join("autokeep"),
        };

        Ok(Self {
            backend_url,
            backend_api_key,
            data_dir,
        })
    }

    /// URL del interfaz tabular (filas con row-level auth)
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.backend_url)
    }

    /// URL del servicio de autenticación
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.backend_url)
    }

    /// Ruta del fichero de sesión persistida
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    /// Ruta del marcador "último aviso de kilometraje"
    pub fn prompt_marker_path(&self) -> PathBuf {
        self.data_dir.join("last_mileage_check")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> EnvironmentConfig {
        EnvironmentConfig {
            backend_url: url.trim_end_matches('/').to_string(),
            backend_api_key: "anon-key".to_string(),
            data_dir: PathBuf::from("/tmp/autokeep-test"),
        }
    }

    #[test]
    fn test_derived_urls() {
        let config = config_with_url("https://proyecto.backend.example/");
        assert_eq!(config.rest_url(), "https://proyecto.backend.example/rest/v1");
        assert_eq!(config.auth_url(), "https://proyecto.backend.example/auth/v1");
    }

    #[test]
    fn test_local_paths_live_under_data_dir() {
        let config = config_with_url("https://x.example");
        assert!(config.session_path().starts_with(&config.data_dir));
        assert!(config.prompt_marker_path().starts_with(&config.data_dir));
    }
}
