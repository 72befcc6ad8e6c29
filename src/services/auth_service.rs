// ============================================================================
// AUTH SERVICE - GoTrue (Supabase Auth)
// ============================================================================
// Equivalente al cliente de auth del SDK: guarda la sesión en localStorage,
// la refresca antes de que caduque y notifica cada cambio a los subscribers.
// El SessionStore es el único consumidor de esas notificaciones.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::AppError;
use crate::models::auth::{PasswordCredentials, RefreshTokenRequest, SignUpRequest, UpdateUserRequest};
use crate::models::{AuthChange, AuthEvent, Session, SignUpOutcome, User, UserMetadata};
use crate::state::reactivity::{EventBus, Subscription};
use crate::utils::constants::{SESSION_REFRESH_MARGIN_SECS, STORAGE_KEY_AUTH_SESSION};
use crate::utils::storage::{load_from_storage, remove_from_storage, save_to_storage};
use super::supabase_client::{network_error, read_empty, read_json, SupabaseClient};

/// Operaciones de auth que consume la app
#[async_trait(?Send)]
pub trait AuthBackend {
    /// Sesión actual (restaurada del almacenamiento si hace falta)
    async fn get_session(&self) -> Result<Option<Session>, AppError>;

    /// Suscribirse a cambios de sesión (login, logout, refresh, update)
    fn on_auth_state_change(&self, listener: Box<dyn Fn(&AuthChange)>) -> Subscription;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AppError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> Result<SignUpOutcome, AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;

    /// Actualiza los metadatos de perfil del usuario actual
    async fn update_user_metadata(&self, metadata: UserMetadata) -> Result<User, AppError>;
}

pub struct SupabaseAuth {
    client: SupabaseClient,
    current: RefCell<Option<Session>>,
    events: EventBus<AuthChange>,
    refresh_timer: RefCell<Option<Timeout>>,
    this: Weak<SupabaseAuth>,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            client,
            current: RefCell::new(None),
            events: EventBus::new(),
            refresh_timer: RefCell::new(None),
            this: this.clone(),
        })
    }

    fn now_secs() -> i64 {
        chrono::Utc::now().timestamp()
    }

    /// Guarda (o borra) la sesión, reprograma el refresh y notifica
    fn apply_session(&self, session: Option<Session>, event: AuthEvent) {
        match &session {
            Some(s) => {
                if let Err(e) = save_to_storage(STORAGE_KEY_AUTH_SESSION, s) {
                    log::warn!("⚠️ No se pudo guardar la sesión: {}", e);
                }
                self.schedule_refresh(s);
            }
            None => {
                remove_from_storage(STORAGE_KEY_AUTH_SESSION);
                self.refresh_timer.borrow_mut().take();
            }
        }
        *self.current.borrow_mut() = session.clone();

        log::info!("🔐 Auth event: {:?}", event);
        self.events.emit(&AuthChange { event, session });
    }

    fn schedule_refresh(&self, session: &Session) {
        let Some(delay_ms) = refresh_delay_ms(session, Self::now_secs()) else {
            return;
        };
        let weak = self.this.clone();
        let timer = Timeout::new(delay_ms, move || {
            if let Some(auth) = weak.upgrade() {
                wasm_bindgen_futures::spawn_local(async move {
                    auth.refresh_current().await;
                });
            }
        });
        // Reemplazar el timer anterior lo cancela
        *self.refresh_timer.borrow_mut() = Some(timer);
    }

    async fn refresh_current(&self) {
        let refresh_token = match self.current.borrow().as_ref() {
            Some(s) => s.refresh_token.clone(),
            None => return,
        };
        match self.refresh_session(&refresh_token).await {
            Ok(session) => self.apply_session(Some(session), AuthEvent::TokenRefreshed),
            Err(e) if refresh_token_rejected(&e) => {
                log::warn!("⚠️ Refresh token rechazado ({}), cerrando sesión", e);
                self.apply_session(None, AuthEvent::SignedOut);
            }
            Err(e) => log::error!("❌ Error refrescando sesión: {}", e),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AppError> {
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.request_token("refresh_token", &body).await
    }

    async fn request_token<B: serde::Serialize>(&self, grant_type: &str, body: &B) -> Result<Session, AppError> {
        let url = self.client.auth_url(&format!("token?grant_type={}", grant_type));
        let response = self
            .client
            .authorize(Request::post(&url), None)
            .json(body)
            .map_err(|e| AppError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;
        let session: Session = read_json(response).await?;
        Ok(session.with_expiry_from(Self::now_secs()))
    }
}

#[async_trait(?Send)]
impl AuthBackend for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        let cached = self.current.borrow().clone();
        let session = match cached.or_else(|| load_from_storage::<Session>(STORAGE_KEY_AUTH_SESSION)) {
            Some(s) => s,
            None => return Ok(None),
        };

        if stored_session_action(&session, Self::now_secs()) == StoredSession::Restore {
            *self.current.borrow_mut() = Some(session.clone());
            self.schedule_refresh(&session);
            return Ok(Some(session));
        }

        log::info!("🔄 Sesión guardada caducada, refrescando...");
        match self.refresh_session(&session.refresh_token).await {
            Ok(fresh) => {
                self.apply_session(Some(fresh.clone()), AuthEvent::TokenRefreshed);
                Ok(Some(fresh))
            }
            Err(e) if refresh_token_rejected(&e) => {
                log::warn!("⚠️ Sesión guardada inválida: {}", e);
                remove_from_storage(STORAGE_KEY_AUTH_SESSION);
                *self.current.borrow_mut() = None;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn on_auth_state_change(&self, listener: Box<dyn Fn(&AuthChange)>) -> Subscription {
        self.events.subscribe(move |change| listener(change))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let body = PasswordCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session = self.request_token("password", &body).await?;
        log::info!("✅ Login correcto: {}", email);
        self.apply_session(Some(session.clone()), AuthEvent::SignedIn);
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> Result<SignUpOutcome, AppError> {
        let url = self.client.auth_url("signup");
        let body = SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            data: metadata,
        };
        let response = self
            .client
            .authorize(Request::post(&url), None)
            .json(&body)
            .map_err(|e| AppError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        let value: serde_json::Value = read_json(response).await?;
        let outcome = sign_up_outcome(value, Self::now_secs())?;
        match &outcome {
            SignUpOutcome::SignedIn(session) => {
                self.apply_session(Some(session.clone()), AuthEvent::SignedIn);
            }
            SignUpOutcome::ConfirmationRequired => {
                log::info!("📧 Registro pendiente de confirmación: {}", email);
            }
        }
        Ok(outcome)
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        let token = self.current.borrow().as_ref().map(|s| s.access_token.clone());
        if let Some(token) = token {
            let url = self.client.auth_url("logout");
            let response = self
                .client
                .authorize(Request::post(&url), Some(&token))
                .send()
                .await
                .map_err(network_error)?;

            tolerate_stale_logout(read_empty(response).await)?;
        }
        self.apply_session(None, AuthEvent::SignedOut);
        Ok(())
    }

    async fn update_user_metadata(&self, metadata: UserMetadata) -> Result<User, AppError> {
        let session = self
            .current
            .borrow()
            .clone()
            .ok_or_else(|| AppError::precondition("You are not logged in."))?;

        let url = self.client.auth_url("user");
        let response = self
            .client
            .authorize(Request::put(&url), Some(&session.access_token))
            .json(&UpdateUserRequest { data: metadata })
            .map_err(|e| AppError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;
        let user: User = read_json(response).await?;

        let updated = Session { user: user.clone(), ..session };
        self.apply_session(Some(updated), AuthEvent::UserUpdated);
        Ok(user)
    }
}

/// Qué hacer con una sesión leída de localStorage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredSession {
    /// Sigue vigente: se usa tal cual
    Restore,
    /// Caduca dentro del margen: pedir tokens nuevos antes de usarla
    Refresh,
}

pub fn stored_session_action(session: &Session, now_secs: i64) -> StoredSession {
    if session.expires_within(now_secs, SESSION_REFRESH_MARGIN_SECS) {
        StoredSession::Refresh
    } else {
        StoredSession::Restore
    }
}

/// El backend rechazó el refresh token: la sesión guardada ya no sirve.
/// Un fallo de red no invalida nada.
pub fn refresh_token_rejected(err: &AppError) -> bool {
    matches!(err, AppError::Backend { .. })
}

/// Logout con un token que el servidor ya no reconoce cuenta como hecho
pub fn tolerate_stale_logout(result: Result<(), AppError>) -> Result<(), AppError> {
    match result {
        Err(AppError::Backend { status: 401 | 403 | 404, .. }) => Ok(()),
        other => other,
    }
}

/// Con confirmación por email GoTrue devuelve solo el usuario, sin tokens
pub fn sign_up_outcome(value: serde_json::Value, now_secs: i64) -> Result<SignUpOutcome, AppError> {
    if value.get("access_token").is_none() {
        return Ok(SignUpOutcome::ConfirmationRequired);
    }
    let session: Session = serde_json::from_value(value).map_err(|e| AppError::Decode(e.to_string()))?;
    Ok(SignUpOutcome::SignedIn(session.with_expiry_from(now_secs)))
}

/// Milisegundos hasta el próximo refresh, o None si no hay expiración conocida
pub fn refresh_delay_ms(session: &Session, now_secs: i64) -> Option<u32> {
    session.expires_at?;
    let secs = (session.seconds_until_expiry(now_secs) - SESSION_REFRESH_MARGIN_SECS).max(0);
    Some(u32::try_from(secs.saturating_mul(1000)).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::fixtures::session;
    use serde_json::json;

    #[test]
    fn refresh_is_scheduled_before_expiry() {
        let s = session("u", None); // expires_at = 1_700_003_600
        let delay = refresh_delay_ms(&s, 1_700_000_000).unwrap();
        assert_eq!(delay as i64, (3600 - SESSION_REFRESH_MARGIN_SECS) * 1000);
    }

    #[test]
    fn expired_session_refreshes_immediately() {
        let s = session("u", None);
        assert_eq!(refresh_delay_ms(&s, 1_800_000_000), Some(0));
    }

    #[test]
    fn unknown_expiry_is_not_scheduled() {
        let mut s = session("u", None);
        s.expires_at = None;
        assert_eq!(refresh_delay_ms(&s, 0), None);
    }

    #[test]
    fn stored_session_is_restored_while_valid() {
        let s = session("u", None); // expires_at = 1_700_003_600
        assert_eq!(stored_session_action(&s, 1_700_000_000), StoredSession::Restore);

        let mut no_expiry = s.clone();
        no_expiry.expires_at = None;
        assert_eq!(stored_session_action(&no_expiry, 1_900_000_000), StoredSession::Restore);
    }

    #[test]
    fn stored_session_near_expiry_is_refreshed() {
        let s = session("u", None);
        let at_margin = 1_700_003_600 - SESSION_REFRESH_MARGIN_SECS;
        assert_eq!(stored_session_action(&s, at_margin), StoredSession::Refresh);
        assert_eq!(stored_session_action(&s, 1_800_000_000), StoredSession::Refresh);
    }

    #[test]
    fn only_backend_rejection_drops_the_session() {
        assert!(refresh_token_rejected(&AppError::backend(400, "Invalid Refresh Token: Already Used")));
        assert!(!refresh_token_rejected(&AppError::Network("offline".into())));
        assert!(!refresh_token_rejected(&AppError::Decode("bad json".into())));
    }

    #[test]
    fn logout_with_dead_token_still_succeeds() {
        for status in [401, 403, 404] {
            assert_eq!(tolerate_stale_logout(Err(AppError::backend(status, "gone"))), Ok(()));
        }
        assert_eq!(tolerate_stale_logout(Ok(())), Ok(()));
        assert_eq!(
            tolerate_stale_logout(Err(AppError::backend(500, "boom"))),
            Err(AppError::backend(500, "boom"))
        );
        assert_eq!(
            tolerate_stale_logout(Err(AppError::Network("offline".into()))),
            Err(AppError::Network("offline".into()))
        );
    }

    #[test]
    fn sign_up_without_tokens_needs_confirmation() {
        let body = json!({
            "id": "u-1",
            "email": "ana@example.com",
            "user_metadata": { "display_name": "Ana" }
        });
        assert_eq!(sign_up_outcome(body, 0), Ok(SignUpOutcome::ConfirmationRequired));
    }

    #[test]
    fn sign_up_with_tokens_signs_in() {
        let body = json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r-1",
            "user": { "id": "u-1", "email": "ana@example.com", "user_metadata": { "display_name": "Ana" } }
        });
        match sign_up_outcome(body, 1_000).unwrap() {
            SignUpOutcome::SignedIn(session) => {
                assert_eq!(session.access_token, "jwt");
                assert_eq!(session.expires_at, Some(4_600));
                assert_eq!(session.user.display_name(), Some("Ana"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn malformed_sign_up_session_is_a_decode_error() {
        let body = json!({ "access_token": "jwt" });
        assert!(matches!(sign_up_outcome(body, 0), Err(AppError::Decode(_))));
    }
}
