// ============================================================================
// ERRORES DE LA APP
// ============================================================================
// Un único enum para todo lo que puede fallar. Ningún error es fatal: cada
// variante termina en un mensaje para el usuario y la UI sigue interactiva.
// ============================================================================

use thiserror::Error;

use crate::services::geolocation::GeolocationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// El backend respondió con error; el mensaje se muestra tal cual
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// La petición no llegó o la respuesta no se pudo leer
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Decode(String),

    /// Acción bloqueada por una comprobación en cliente (sin llamada al backend)
    #[error("{0}")]
    Precondition(String),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl AppError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        AppError::Backend {
            status,
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        AppError::Precondition(message.into())
    }

    /// Texto que se enseña en el alert
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_is_shown_verbatim() {
        let err = AppError::backend(400, "Invalid login credentials");
        assert_eq!(err.user_message(), "Invalid login credentials");
    }

    #[test]
    fn geolocation_errors_convert() {
        let err: AppError = GeolocationError::Timeout.into();
        assert_eq!(
            err.user_message(),
            "Unable to get your location. Location request timed out. Please try again."
        );
        assert!(matches!(err, AppError::Geolocation(_)));
    }
}
