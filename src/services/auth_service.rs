//! Servicio de autenticación
//!
//! La identidad la emite el servicio de auth del backend alojado; aquí solo se
//! intercambian credenciales por una sesión, se persiste la sesión en el
//! dispositivo y se publica cada transición de estado por un canal `watch`
//! para que la UI reaccione.

use chrono::{Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::environment::EnvironmentConfig;
use crate::models::auth::{AuthState, Session, UserInfo};
use crate::utils::errors::AppError;

#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshCredentials<'a> {
    refresh_token: &'a str,
}

/// Respuesta del endpoint de token del servicio de auth
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    /// Segundos de validez del access token
    expires_in: i64,
    user: UserInfo,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: Utc::now() + Duration::seconds(self.expires_in),
            user: self.user,
        }
    }
}

pub struct AuthService {
    client: Client,
    auth_url: String,
    api_key: String,
    session_path: PathBuf,
    state_tx: watch::Sender<AuthState>,
}

impl AuthService {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        let session_path = config.session_path();
        let initial = match Self::load_session(&session_path) {
            Some(session) => AuthState::SignedIn(session),
            None => AuthState::SignedOut,
        };
        let (state_tx, _) = watch::channel(initial);

        Self {
            client,
            auth_url: config.auth_url(),
            api_key: config.backend_api_key.clone(),
            session_path,
            state_tx,
        }
    }

    /// Suscribirse a las transiciones de estado de sesión
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }

    pub fn current_state(&self) -> AuthState {
        self.state_tx.borrow().clone()
    }

    /// Registrar un usuario nuevo. El backend puede exigir confirmación por
    /// correo antes del primer login.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(format!("{}/signup", self.auth_url))
            .header("apikey", &self.api_key)
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;

        Self::check_auth_status(response).await?;
        Ok(())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let response = self
            .client
            .post(format!("{}/token?grant_type=password", self.auth_url))
            .header("apikey", &self.api_key)
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;

        let response = Self::check_auth_status(response).await?;
        let session = response.json::<TokenResponse>().await?.into_session();

        self.persist_session(&session)?;
        self.state_tx
            .send_replace(AuthState::SignedIn(session.clone()));
        Ok(session)
    }

    async fn refresh(&self, session: &Session) -> Result<Session, AppError> {
        let response = self
            .client
            .post(format!("{}/token?grant_type=refresh_token", self.auth_url))
            .header("apikey", &self.api_key)
            .json(&RefreshCredentials {
                refresh_token: &session.refresh_token,
            })
            .send()
            .await?;

        let response = Self::check_auth_status(response).await?;
        let session = response.json::<TokenResponse>().await?.into_session();

        self.persist_session(&session)?;
        self.state_tx
            .send_replace(AuthState::SignedIn(session.clone()));
        Ok(session)
    }

    /// Sesión vigente del dispositivo. Si el access token caducó se refresca
    /// una vez; si no hay sesión el caller recibe `Unauthorized`.
    pub async fn current_session(&self) -> Result<Session, AppError> {
        let session = match self.current_state() {
            AuthState::SignedIn(session) => session,
            AuthState::SignedOut => {
                return Err(AppError::Unauthorized("no hay sesión activa".to_string()))
            }
        };

        if !session.is_expired() {
            return Ok(session);
        }

        debug!("access token caducado, refrescando sesión");
        match self.refresh(&session).await {
            Ok(refreshed) => Ok(refreshed),
            Err(e) => {
                // El refresh token también dejó de valer: la sesión muere aquí
                self.clear_session();
                Err(e)
            }
        }
    }

    /// Cerrar sesión. La revocación remota es best-effort: la sesión local se
    /// elimina aunque el backend no responda.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        if let AuthState::SignedIn(session) = self.current_state() {
            let result = self
                .client
                .post(format!("{}/logout", self.auth_url))
                .header("apikey", &self.api_key)
                .bearer_auth(&session.access_token)
                .send()
                .await;
            if let Err(e) = result {
                warn!("no se pudo revocar la sesión en el backend: {}", e);
            }
        }

        self.clear_session();
        Ok(())
    }

    fn clear_session(&self) {
        if self.session_path.exists() {
            if let Err(e) = fs::remove_file(&self.session_path) {
                warn!("no se pudo borrar el fichero de sesión: {}", e);
            }
        }
        self.state_tx.send_replace(AuthState::SignedOut);
    }

    fn persist_session(&self, session: &Session) -> Result<(), AppError> {
        if let Some(parent) = self.session_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.session_path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    fn load_session(path: &PathBuf) -> Option<Session> {
        let raw = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("fichero de sesión ilegible, se ignora: {}", e);
                None
            }
        }
    }

    async fn check_auth_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.is_client_error() {
            return Err(AppError::Unauthorized(format!(
                "auth service rejected the request ({})",
                status
            )));
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::RemoteStore(format!(
            "auth service failed with {}: {}",
            status, body
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn config_in(dir: &TempDir) -> EnvironmentConfig {
        EnvironmentConfig {
            backend_url: "http://127.0.0.1:1".to_string(),
            backend_api_key: "anon-key".to_string(),
            data_dir: dir.path().to_path_buf(),
        }
    }

    fn session() -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            user: UserInfo {
                id: Uuid::new_v4(),
                email: "driver@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_starts_signed_out_without_session_file() {
        let dir = TempDir::new().unwrap();
        let service = AuthService::new(Client::new(), &config_in(&dir));
        assert!(service.current_state().session().is_none());
    }

    #[test]
    fn test_persisted_session_survives_restart() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let service = AuthService::new(Client::new(), &config);
        service.persist_session(&session()).unwrap();

        // Un servicio nuevo sobre el mismo data_dir arranca con sesión
        let service = AuthService::new(Client::new(), &config);
        let state = service.current_state();
        assert_eq!(state.session().unwrap().user.email, "driver@example.com");
    }

    #[test]
    fn test_corrupt_session_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(config.session_path(), "not json").unwrap();

        let service = AuthService::new(Client::new(), &config);
        assert!(service.current_state().session().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_transitions_to_signed_out() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let service = AuthService::new(Client::new(), &config);
        service.persist_session(&session()).unwrap();
        service.state_tx.send_replace(AuthState::SignedIn(session()));

        let mut rx = service.subscribe();
        // La revocación remota falla (URL inalcanzable) pero la sesión local
        // se elimina igualmente
        service.sign_out().await.unwrap();

        rx.changed().await.unwrap();
        assert!(rx.borrow().session().is_none());
        assert!(!config.session_path().exists());

        let err = service.current_session().await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
