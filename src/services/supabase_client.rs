// ============================================================================
// SUPABASE CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Construye URLs, añade cabeceras (apikey + Authorization) y traduce las
// respuestas de error de GoTrue/PostgREST a AppError. Sin lógica de negocio.
// ============================================================================

use gloo_net::http::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::CONFIG;
use crate::error::AppError;

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone, Debug, PartialEq)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    pub fn from_config() -> Self {
        if CONFIG.supabase_anon_key.is_empty() {
            log::warn!("⚠️ SUPABASE_ANON_KEY vacío: las peticiones al backend fallarán");
        }
        Self::new(CONFIG.supabase_url.clone(), CONFIG.supabase_anon_key.clone())
    }

    /// `{base}/rest/v1/{table}`
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// `{base}/auth/v1/{path}`
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Valor de Authorization: token del usuario o, sin sesión, la anon key
    pub fn bearer(&self, access_token: Option<&str>) -> String {
        format!("Bearer {}", access_token.unwrap_or(&self.anon_key))
    }

    /// Añade apikey + Authorization a una petición
    pub fn authorize(&self, builder: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &self.bearer(access_token))
    }
}

/// Envía la petición y decodifica el JSON de la respuesta
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if !response.ok() {
        return Err(error_from_response(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Para endpoints que devuelven 204 / cuerpo vacío
pub async fn read_empty(response: Response) -> Result<(), AppError> {
    if !response.ok() {
        return Err(error_from_response(response).await);
    }
    Ok(())
}

pub fn network_error(err: gloo_net::Error) -> AppError {
    AppError::Network(err.to_string())
}

async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();
    let err = error_from_body(status, &status_text, &body);
    log::error!("❌ Backend HTTP {}: {}", status, err);
    err
}

/// Cuerpo de error de GoTrue / PostgREST (todos los campos opcionales)
#[derive(Debug, Default, Deserialize)]
struct BackendErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl BackendErrorBody {
    fn into_message(self) -> Option<String> {
        [self.error_description, self.msg, self.message, self.error]
            .into_iter()
            .flatten()
            .map(|m| m.trim().to_string())
            .find(|m| !m.is_empty())
    }
}

/// Mensaje del backend tal cual; si no hay JSON legible, "HTTP <status>"
pub fn error_from_body(status: u16, status_text: &str, body: &str) -> AppError {
    let message = serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .and_then(BackendErrorBody::into_message)
        .unwrap_or_else(|| {
            if status_text.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, status_text)
            }
        });
    AppError::backend(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_base() {
        let client = SupabaseClient::new("https://abc.supabase.co/", "anon");
        assert_eq!(client.rest_url("wifi_spots"), "https://abc.supabase.co/rest/v1/wifi_spots");
        assert_eq!(
            client.auth_url("/token?grant_type=password"),
            "https://abc.supabase.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn bearer_falls_back_to_anon_key() {
        let client = SupabaseClient::new("https://x", "anon");
        assert_eq!(client.bearer(None), "Bearer anon");
        assert_eq!(client.bearer(Some("jwt")), "Bearer jwt");
    }

    #[test]
    fn gotrue_error_description_wins() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            error_from_body(400, "Bad Request", body),
            AppError::backend(400, "Invalid login credentials")
        );
    }

    #[test]
    fn gotrue_msg_and_postgrest_message() {
        let gotrue = r#"{"code":422,"msg":"User already registered"}"#;
        assert_eq!(error_from_body(422, "", gotrue).user_message(), "User already registered");

        let postgrest = r#"{"code":"42501","message":"new row violates row-level security policy","details":null,"hint":null}"#;
        assert_eq!(
            error_from_body(403, "Forbidden", postgrest).user_message(),
            "new row violates row-level security policy"
        );
    }

    #[test]
    fn unreadable_body_uses_status() {
        assert_eq!(error_from_body(502, "Bad Gateway", "<html>").user_message(), "HTTP 502: Bad Gateway");
        assert_eq!(error_from_body(500, "", "").user_message(), "HTTP 500");
    }
}
