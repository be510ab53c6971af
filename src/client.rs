//! Cliente HTTP para el backend tabular alojado
//!
//! Este módulo contiene el cliente HTTP genérico contra el interfaz de filas
//! del backend (filtros por columna, orden, row-level auth por token). Todo el
//! detalle de persistencia y esquema vive en el backend; aquí solo se forma la
//! petición y se interpreta el código de respuesta.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Cliente del interfaz tabular del backend alojado
pub struct TableClient {
    pub client: Client,
    pub rest_url: String,
    pub api_key: String,
}

/// Filtro de igualdad sobre una columna (`col=eq.valor`)
pub fn eq<T: ToString>(value: T) -> String {
    format!("eq.{}", urlencoding::encode(&value.to_string()))
}

impl TableClient {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            rest_url: config.rest_url(),
            api_key: config.backend_api_key.clone(),
        }
    }

    fn table_url(&self, table: &str, filters: &[(&str, String)], order: Option<&str>) -> String {
        let mut params: Vec<String> = filters
            .iter()
            .map(|(column, filter)| format!("{}={}", column, filter))
            .collect();
        if let Some(order) = order {
            params.push(format!("order={}", order));
        }
        if params.is_empty() {
            format!("{}/{}", self.rest_url, table)
        } else {
            format!("{}/{}?{}", self.rest_url, table, params.join("&"))
        }
    }

    /// Leer filas de una tabla con filtros de igualdad y orden opcional
    pub async fn select<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        filters: &[(&str, String)],
        order: Option<&str>,
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .client
            .get(self.table_url(table, filters, order))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        let response = Self::check_status(response, table).await?;
        Ok(response.json::<Vec<T>>().await?)
    }

    /// Insertar una fila y devolver la representación creada por el backend
    pub async fn insert<R: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        body: &Value,
    ) -> Result<R, AppError> {
        let response = self
            .client
            .post(self.table_url(table, &[], None))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let response = Self::check_status(response, table).await?;
        let mut rows = response.json::<Vec<R>>().await?;
        if rows.is_empty() {
            return Err(AppError::RemoteStore(format!(
                "insert into '{}' returned no representation",
                table
            )));
        }
        Ok(rows.remove(0))
    }

    /// Actualizar las filas que cumplan los filtros
    pub async fn update(
        &self,
        token: &str,
        table: &str,
        filters: &[(&str, String)],
        body: &Value,
    ) -> Result<(), AppError> {
        let response = self
            .client
            .patch(self.table_url(table, filters, None))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        Self::check_status(response, table).await?;
        Ok(())
    }

    /// Borrar las filas que cumplan los filtros
    pub async fn delete(
        &self,
        token: &str,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.table_url(table, filters, None))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        Self::check_status(response, table).await?;
        Ok(())
    }

    async fn check_status(
        response: reqwest::Response,
        table: &str,
    ) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::Unauthorized(format!(
                "backend rejected access to '{}' ({})",
                table, status
            )));
        }

        // El cuerpo solo se captura para diagnóstico; al usuario se le muestra
        // un mensaje genérico de reintento
        let body = response.text().await.unwrap_or_default();
        Err(AppError::RemoteStore(format!(
            "'{}' request failed with {}: {}",
            table, status, body
        )))
    }
}
