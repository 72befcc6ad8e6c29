use serde::{Deserialize, Serialize};

// ============================================================================
// AUTH - Sesión de GoTrue (Supabase Auth)
// ============================================================================

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Resto de claves que el backend pueda guardar
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl User {
    /// display_name no vacío, si existe
    pub fn display_name(&self) -> Option<&str> {
        self.user_metadata
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn has_display_name(&self) -> bool {
        self.display_name().is_some()
    }

    /// Inicial para el avatar: display name, si no email, si no "U"
    pub fn avatar_initial(&self) -> String {
        let source = self
            .display_name()
            .or_else(|| self.email.as_deref().map(str::trim).filter(|e| !e.is_empty()))
            .unwrap_or("U");
        source
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    /// Epoch en segundos
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Completa `expires_at` cuando el backend solo manda `expires_in`
    pub fn with_expiry_from(mut self, now_secs: i64) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(now_secs + self.expires_in);
        }
        self
    }

    /// ¿Caduca dentro de `margin_secs`?
    pub fn expires_within(&self, now_secs: i64, margin_secs: i64) -> bool {
        match self.expires_at {
            Some(at) => at - now_secs <= margin_secs,
            None => false,
        }
    }

    /// Segundos hasta la expiración (0 si ya caducó o no se conoce)
    pub fn seconds_until_expiry(&self, now_secs: i64) -> i64 {
        self.expires_at.map(|at| (at - now_secs).max(0)).unwrap_or(0)
    }
}

/// Estado de sesión que ve el resto de la app
#[derive(Clone, PartialEq, Debug, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn from_session(session: Option<Session>) -> Self {
        match session {
            Some(s) => SessionState::Authenticated(s),
            None => SessionState::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(s) => Some(s),
            SessionState::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session().map(|s| &s.user)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user().map(|u| u.id.as_str())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session().map(|s| s.access_token.as_str())
    }
}

/// Eventos que emite el backend de auth
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// Notificación completa: qué pasó y cómo queda la sesión
#[derive(Clone, PartialEq, Debug)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

/// Resultado de un registro
#[derive(Clone, PartialEq, Debug)]
pub enum SignUpOutcome {
    /// El backend exige confirmar el email antes de iniciar sesión
    ConfirmationRequired,
    /// Auto-confirmación activada: ya hay sesión
    SignedIn(Session),
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct PasswordCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: UserMetadata,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct UpdateUserRequest {
    pub data: UserMetadata,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(id: &str, email: &str, display_name: Option<&str>) -> User {
        User {
            id: id.to_string(),
            email: Some(email.to_string()),
            user_metadata: UserMetadata {
                display_name: display_name.map(str::to_string),
                extra: Default::default(),
            },
        }
    }

    pub fn session(id: &str, display_name: Option<&str>) -> Session {
        Session {
            access_token: format!("token-{}", id),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            expires_at: Some(1_700_003_600),
            refresh_token: format!("refresh-{}", id),
            user: user(id, &format!("{}@example.com", id), display_name),
        }
    }
}
