//! Estado compartido de la aplicación
//!
//! Un único `reqwest::Client` compartido entre el cliente tabular y el
//! servicio de auth, más los servicios locales del dispositivo.

use reqwest::Client;
use std::sync::Arc;

use crate::client::TableClient;
use crate::config::environment::EnvironmentConfig;
use crate::services::auth_service::AuthService;
use crate::services::prompt_service::PromptService;

pub struct AppState {
    pub config: EnvironmentConfig,
    pub tables: Arc<TableClient>,
    pub auth: AuthService,
    pub prompt: PromptService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Self {
        let http_client = Client::new();
        let tables = Arc::new(TableClient::new(http_client.clone(), &config));
        let auth = AuthService::new(http_client, &config);
        let prompt = PromptService::new(&config);

        Self {
            config,
            tables,
            auth,
            prompt,
        }
    }
}
