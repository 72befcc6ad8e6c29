// ============================================================================
// SESSION STORE - Estado de sesión compartido
// ============================================================================
// Único dueño del SessionState. Se alimenta del backend de auth:
// 1. se suscribe a los cambios de sesión
// 2. pide la sesión actual UNA vez (sin reintentos)
// Los consumidores leen `current()` y se suscriben con `subscribe()`.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::models::{AuthChange, SessionState};
use crate::services::AuthBackend;
use crate::state::reactivity::{ReactiveState, Subscription};

pub struct SessionStore {
    auth: Rc<dyn AuthBackend>,
    state: ReactiveState<SessionState>,
    /// Se incrementa con cada evento del backend
    generation: Cell<u64>,
    backend_subscription: RefCell<Option<Subscription>>,
    this: Weak<SessionStore>,
}

impl SessionStore {
    pub fn new(auth: Rc<dyn AuthBackend>) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            auth,
            state: ReactiveState::new(SessionState::Anonymous),
            generation: Cell::new(0),
            backend_subscription: RefCell::new(None),
            this: this.clone(),
        })
    }

    /// Arranca el store. Llamar una vez al montar la app.
    pub async fn start(&self) {
        if self.backend_subscription.borrow().is_some() {
            log::warn!("⚠️ SessionStore ya iniciado, ignorando");
            return;
        }

        let weak = self.this.clone();
        let subscription = self.auth.on_auth_state_change(Box::new(move |change: &AuthChange| {
            if let Some(store) = weak.upgrade() {
                store.apply_change(change);
            }
        }));
        *self.backend_subscription.borrow_mut() = Some(subscription);

        let generation_before = self.generation.get();
        match self.auth.get_session().await {
            Ok(session) => {
                if self.generation.get() != generation_before {
                    // Llegó un evento mientras tanto: es más reciente que el snapshot
                    log::info!("ℹ️ Snapshot de sesión descartado (ya hubo un evento)");
                    return;
                }
                log::info!(
                    "🔐 Sesión inicial: {}",
                    if session.is_some() { "autenticado" } else { "anónimo" }
                );
                self.state.set(SessionState::from_session(session));
            }
            Err(e) => {
                log::warn!("⚠️ No se pudo obtener la sesión inicial: {}", e);
            }
        }
    }

    fn apply_change(&self, change: &AuthChange) {
        self.generation.set(self.generation.get() + 1);
        log::info!("🔄 SessionStore: {:?}", change.event);
        self.state.set(SessionState::from_session(change.session.clone()));
    }

    /// Deja de escuchar al backend (teardown)
    pub fn stop(&self) {
        if let Some(subscription) = self.backend_subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    }

    pub fn current(&self) -> SessionState {
        self.state.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionState) + 'static,
    {
        self.state.subscribe(callback)
    }

    /// Backend de auth para las acciones del panel (login, logout...)
    pub fn auth(&self) -> Rc<dyn AuthBackend> {
        self.auth.clone()
    }

    pub fn is_listening(&self) -> bool {
        self.backend_subscription.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::auth::fixtures::session;
    use crate::models::AuthEvent;
    use crate::services::mock::MockAuth;

    #[tokio::test]
    async fn start_takes_initial_snapshot() {
        let auth = Rc::new(MockAuth::new(Some(session("u-1", Some("Ana")))));
        let store = SessionStore::new(auth.clone());
        assert!(!store.current().is_authenticated());

        store.start().await;
        assert_eq!(store.current().user_id(), Some("u-1"));
        assert_eq!(auth.calls(), vec!["get_session".to_string()]);
    }

    #[tokio::test]
    async fn failed_snapshot_stays_anonymous() {
        let auth = Rc::new(MockAuth::new(None));
        *auth.initial.borrow_mut() = Err(AppError::Network("offline".into()));
        let store = SessionStore::new(auth.clone());

        store.start().await;
        assert_eq!(store.current(), SessionState::Anonymous);
        assert!(store.is_listening());
    }

    #[tokio::test]
    async fn events_replace_state_and_notify() {
        let auth = Rc::new(MockAuth::new(None));
        let store = SessionStore::new(auth.clone());
        store.start().await;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            store.subscribe(move |s| seen.borrow_mut().push(s.is_authenticated()))
        };

        auth.emit(AuthEvent::SignedIn, Some(session("u-2", None)));
        assert_eq!(store.current().user_id(), Some("u-2"));

        auth.emit(AuthEvent::SignedOut, None);
        assert!(!store.current().is_authenticated());
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[tokio::test]
    async fn late_snapshot_does_not_override_newer_event() {
        let auth = Rc::new(MockAuth::new(None));
        *auth.event_during_fetch.borrow_mut() = Some(AuthChange {
            event: AuthEvent::SignedIn,
            session: Some(session("fresh", None)),
        });
        let store = SessionStore::new(auth.clone());

        store.start().await;
        assert_eq!(store.current().user_id(), Some("fresh"));
    }

    #[tokio::test]
    async fn stop_unsubscribes_from_backend() {
        let auth = Rc::new(MockAuth::new(None));
        let store = SessionStore::new(auth.clone());
        store.start().await;
        assert_eq!(auth.events.subscriber_count(), 1);

        store.stop();
        assert_eq!(auth.events.subscriber_count(), 0);
        auth.emit(AuthEvent::SignedIn, Some(session("ignored", None)));
        assert!(!store.current().is_authenticated());
    }

    #[tokio::test]
    async fn start_twice_is_ignored() {
        let auth = Rc::new(MockAuth::new(None));
        let store = SessionStore::new(auth.clone());
        store.start().await;
        store.start().await;
        assert_eq!(auth.calls().len(), 1);
    }
}
