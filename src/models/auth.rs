//! Modelos de autenticación
//!
//! La identidad la gestiona por completo el servicio de auth del backend
//! alojado; aquí solo se modela la sesión que éste emite.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Usuario autenticado según el servicio de auth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
}

/// Sesión emitida por el servicio de auth, persistida en el dispositivo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserInfo,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Estado de autenticación observable por la UI
///
/// El `AuthService` publica cada transición por un canal `watch`; los
/// consumidores leen el valor actual o esperan el siguiente cambio.
#[derive(Debug, Clone)]
pub enum AuthState {
    SignedOut,
    SignedIn(Session),
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::SignedIn(session) => Some(session),
            AuthState::SignedOut => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_in(minutes: i64) -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + Duration::minutes(minutes),
            user: UserInfo {
                id: Uuid::new_v4(),
                email: "driver@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_session_expiry() {
        assert!(!session_expiring_in(60).is_expired());
        assert!(session_expiring_in(-1).is_expired());
    }

    #[test]
    fn test_auth_state_session_accessor() {
        assert!(AuthState::SignedOut.session().is_none());
        let state = AuthState::SignedIn(session_expiring_in(60));
        assert!(state.session().is_some());
    }
}
