// Backends en memoria para los tests de stores y viewmodels

use async_trait::async_trait;
use std::cell::{Cell, RefCell};

use crate::error::AppError;
use crate::models::{
    AuthChange, AuthEvent, HotspotId, HotspotRecord, NewHotspot, Session, SignUpOutcome, User,
    UserMetadata,
};
use crate::state::reactivity::{EventBus, Subscription};
use super::{AuthBackend, HotspotSource};

pub struct MockAuth {
    pub initial: RefCell<Result<Option<Session>, AppError>>,
    /// Evento que "llega" mientras get_session está en curso
    pub event_during_fetch: RefCell<Option<AuthChange>>,
    pub sign_in_result: RefCell<Result<Session, AppError>>,
    pub sign_up_result: RefCell<Result<SignUpOutcome, AppError>>,
    pub sign_out_result: RefCell<Result<(), AppError>>,
    pub update_result: RefCell<Result<User, AppError>>,
    pub calls: RefCell<Vec<String>>,
    pub last_metadata: RefCell<Option<UserMetadata>>,
    pub events: EventBus<AuthChange>,
}

impl MockAuth {
    pub fn new(initial: Option<Session>) -> Self {
        let fail = || AppError::backend(500, "not configured");
        Self {
            initial: RefCell::new(Ok(initial)),
            event_during_fetch: RefCell::new(None),
            sign_in_result: RefCell::new(Err(fail())),
            sign_up_result: RefCell::new(Ok(SignUpOutcome::ConfirmationRequired)),
            sign_out_result: RefCell::new(Ok(())),
            update_result: RefCell::new(Err(fail())),
            calls: RefCell::new(Vec::new()),
            last_metadata: RefCell::new(None),
            events: EventBus::new(),
        }
    }

    pub fn emit(&self, event: AuthEvent, session: Option<Session>) {
        self.events.emit(&AuthChange { event, session });
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl AuthBackend for MockAuth {
    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        self.calls.borrow_mut().push("get_session".into());
        if let Some(change) = self.event_during_fetch.borrow_mut().take() {
            self.events.emit(&change);
        }
        self.initial.borrow().clone()
    }

    fn on_auth_state_change(&self, listener: Box<dyn Fn(&AuthChange)>) -> Subscription {
        self.events.subscribe(move |c| listener(c))
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<Session, AppError> {
        self.calls.borrow_mut().push(format!("sign_in:{}", email));
        let result = self.sign_in_result.borrow().clone();
        if let Ok(session) = &result {
            self.emit(AuthEvent::SignedIn, Some(session.clone()));
        }
        result
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        metadata: UserMetadata,
    ) -> Result<SignUpOutcome, AppError> {
        self.calls.borrow_mut().push(format!("sign_up:{}", email));
        *self.last_metadata.borrow_mut() = Some(metadata);
        self.sign_up_result.borrow().clone()
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        self.calls.borrow_mut().push("sign_out".into());
        let result = self.sign_out_result.borrow().clone();
        if result.is_ok() {
            self.emit(AuthEvent::SignedOut, None);
        }
        result
    }

    async fn update_user_metadata(&self, metadata: UserMetadata) -> Result<User, AppError> {
        self.calls.borrow_mut().push("update_user".into());
        *self.last_metadata.borrow_mut() = Some(metadata);
        self.update_result.borrow().clone()
    }
}

pub struct MockHotspots {
    pub rows: RefCell<Vec<HotspotRecord>>,
    pub fetch_error: RefCell<Option<AppError>>,
    pub insert_error: RefCell<Option<AppError>>,
    pub inserts: RefCell<Vec<(NewHotspot, String)>>,
    pub fetch_calls: Cell<usize>,
}

impl MockHotspots {
    pub fn new(rows: Vec<HotspotRecord>) -> Self {
        Self {
            rows: RefCell::new(rows),
            fetch_error: RefCell::new(None),
            insert_error: RefCell::new(None),
            inserts: RefCell::new(Vec::new()),
            fetch_calls: Cell::new(0),
        }
    }
}

#[async_trait(?Send)]
impl HotspotSource for MockHotspots {
    async fn fetch_all(&self) -> Result<Vec<HotspotRecord>, AppError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        if let Some(err) = self.fetch_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.rows.borrow().clone())
    }

    async fn insert(&self, spot: &NewHotspot, access_token: &str) -> Result<HotspotRecord, AppError> {
        self.inserts
            .borrow_mut()
            .push((spot.clone(), access_token.to_string()));
        if let Some(err) = self.insert_error.borrow().clone() {
            return Err(err);
        }
        let record = HotspotRecord {
            id: HotspotId::new(format!("{}", self.rows.borrow().len() + 1)),
            lat: spot.lat,
            lng: spot.lng,
            ssid: spot.ssid.clone(),
            strength: spot.strength,
            freq: spot.freq,
            notes: spot.notes.clone(),
            user_id: Some(spot.user_id.clone()),
        };
        self.rows.borrow_mut().push(record.clone());
        Ok(record)
    }
}

pub fn record(id: &str, strength: u8, freq: crate::models::FrequencyBand) -> HotspotRecord {
    HotspotRecord {
        id: HotspotId::new(id),
        lat: 13.08,
        lng: 80.27,
        ssid: format!("net-{}", id),
        strength: crate::models::SignalStrength::clamped(strength as i64),
        freq,
        notes: None,
        user_id: Some("owner".to_string()),
    }
}
