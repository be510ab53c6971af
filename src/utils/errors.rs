//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores de la aplicación
//! y el mensaje que se muestra al usuario para cada uno.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote store error: {0}")]
    RemoteStore(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AppError {
    /// Mensaje orientado al usuario final. Los detalles del backend no se
    /// interpretan: un fallo remoto siempre se presenta como reintentable.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(e) => format!("Datos inválidos: {}", e),
            AppError::BadRequest(msg) => format!("Datos inválidos: {}", msg),
            AppError::Unauthorized(_) => {
                "Sesión no válida. Inicia sesión con `autokeep login`.".to_string()
            }
            AppError::NotFound(msg) => format!("No encontrado: {}", msg),
            AppError::RemoteStore(_) | AppError::Http(_) => {
                "Error comunicando con el servidor. Inténtalo de nuevo.".to_string()
            }
            AppError::Io(e) => format!("Error de disco: {}", e),
            AppError::Serde(e) => format!("Respuesta inesperada del servidor: {}", e),
        }
    }
}
