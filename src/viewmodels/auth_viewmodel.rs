// ============================================================================
// AUTH VIEWMODEL - Login, registro, logout y display name
// ============================================================================
// Devuelve valores; el panel de auth decide qué alert mostrar. El estado de
// sesión NO se toca aquí: llega solo a través del SessionStore.
// ============================================================================

use crate::error::AppError;
use crate::models::{SessionState, SignUpOutcome, User, UserMetadata};
use crate::services::AuthBackend;

pub const DISPLAY_NAME_MISSING_ON_SIGNUP: &str = "Please enter a display name.";
pub const DISPLAY_NAME_REQUIRED: &str = "Display name is required";
pub const CONFIRMATION_SENT: &str = "Check your email for the confirmation link!";
pub const CREDENTIALS_REQUIRED: &str = "Please enter your email and password.";

/// Qué muestra el panel de auth
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPanelState {
    Anonymous,
    Complete { email: String, initial: String },
    /// Sesión válida sin display name: se pide, pero no bloquea nada
    MissingDisplayName { email: String, initial: String },
}

impl AuthPanelState {
    pub fn from_session(state: &SessionState) -> Self {
        let Some(user) = state.user() else {
            return AuthPanelState::Anonymous;
        };
        let email = user.email.clone().unwrap_or_default();
        let initial = user.avatar_initial();
        if user.has_display_name() {
            AuthPanelState::Complete { email, initial }
        } else {
            AuthPanelState::MissingDisplayName { email, initial }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    fn validated(&self) -> Result<(String, &str), AppError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(AppError::precondition(CREDENTIALS_REQUIRED));
        }
        Ok((email.to_string(), &self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignUpForm {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

/// Resultado visible de un registro
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpResult {
    /// Mostrar CONFIRMATION_SENT
    ConfirmationSent,
    /// El backend inició sesión directamente
    SignedIn,
}

pub struct AuthViewModel;

impl AuthViewModel {
    pub async fn login(auth: &dyn AuthBackend, form: &LoginForm) -> Result<(), AppError> {
        let (email, password) = form.validated()?;
        auth.sign_in_with_password(&email, password).await?;
        Ok(())
    }

    pub async fn sign_up(auth: &dyn AuthBackend, form: &SignUpForm) -> Result<SignUpResult, AppError> {
        let display_name = form.display_name.trim();
        if display_name.is_empty() {
            return Err(AppError::precondition(DISPLAY_NAME_MISSING_ON_SIGNUP));
        }
        let email = form.email.trim();
        if email.is_empty() || form.password.is_empty() {
            return Err(AppError::precondition(CREDENTIALS_REQUIRED));
        }

        let metadata = UserMetadata {
            display_name: Some(display_name.to_string()),
            ..Default::default()
        };
        match auth.sign_up(email, &form.password, metadata).await? {
            SignUpOutcome::ConfirmationRequired => Ok(SignUpResult::ConfirmationSent),
            SignUpOutcome::SignedIn(_) => Ok(SignUpResult::SignedIn),
        }
    }

    /// Delegar al backend; el panel se entera por la suscripción
    pub async fn logout(auth: &dyn AuthBackend) -> Result<(), AppError> {
        auth.sign_out().await
    }

    pub async fn save_display_name(auth: &dyn AuthBackend, value: &str) -> Result<User, AppError> {
        let display_name = value.trim();
        if display_name.is_empty() {
            return Err(AppError::precondition(DISPLAY_NAME_REQUIRED));
        }
        let metadata = UserMetadata {
            display_name: Some(display_name.to_string()),
            ..Default::default()
        };
        auth.update_user_metadata(metadata).await
    }
}
