// ============================================================================
// ADD SPOT VIEWMODEL - Formulario de nuevo hotspot
// ============================================================================
// Comprueba precondiciones, construye el NewHotspot y hace un único insert.
// Los hooks/componentes solo muestran el resultado.
// ============================================================================

use crate::error::AppError;
use crate::models::{FrequencyBand, HotspotRecord, LatLng, NewHotspot, SessionState, SignalStrength};
use crate::services::HotspotSource;

pub const NO_POSITION_MESSAGE: &str =
    "Please click on the map or use 'Get Current Location' first to select a location for the new WiFi spot.";
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in first to add WiFi spots.";
pub const SUBMIT_PRECONDITION_MESSAGE: &str = "No position selected or you are not logged in.";
pub const SSID_REQUIRED_MESSAGE: &str = "Please enter the network name (SSID).";
pub const SUCCESS_MESSAGE: &str = "WiFi spot added successfully!";

/// Texto del botón de envío
pub fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        "Submitting..."
    } else {
        "Submit Spot"
    }
}

/// Valores del formulario mientras se edita (sin recortar)
#[derive(Clone, PartialEq, Debug, Default)]
pub struct AddSpotDraft {
    pub ssid: String,
    pub notes: String,
    pub strength: SignalStrength,
    pub freq: FrequencyBand,
}

impl AddSpotDraft {
    fn notes_value(&self) -> Option<String> {
        let notes = self.notes.trim();
        (!notes.is_empty()).then(|| notes.to_string())
    }
}

pub struct AddSpotViewModel;

impl AddSpotViewModel {
    /// ¿Se puede abrir el formulario?
    pub fn can_open(pending: Option<LatLng>, session: &SessionState) -> Result<LatLng, AppError> {
        let position = pending.ok_or_else(|| AppError::precondition(NO_POSITION_MESSAGE))?;
        if !session.is_authenticated() {
            return Err(AppError::precondition(LOGIN_REQUIRED_MESSAGE));
        }
        Ok(position)
    }

    /// Cuerpo del insert: posición + campos + usuario actual
    pub fn build_record(
        draft: &AddSpotDraft,
        pending: Option<LatLng>,
        session: &SessionState,
    ) -> Result<NewHotspot, AppError> {
        let (position, user_id) = match (pending, session.user_id()) {
            (Some(p), Some(id)) => (p, id.to_string()),
            _ => return Err(AppError::precondition(SUBMIT_PRECONDITION_MESSAGE)),
        };
        let ssid = draft.ssid.trim();
        if ssid.is_empty() {
            return Err(AppError::precondition(SSID_REQUIRED_MESSAGE));
        }

        Ok(NewHotspot {
            lat: position.lat,
            lng: position.lng,
            ssid: ssid.to_string(),
            strength: draft.strength,
            freq: draft.freq,
            notes: draft.notes_value(),
            user_id,
        })
    }

    /// Un único insert con el token del usuario; sin reintentos
    pub async fn submit(
        source: &dyn HotspotSource,
        draft: &AddSpotDraft,
        pending: Option<LatLng>,
        session: &SessionState,
    ) -> Result<HotspotRecord, AppError> {
        let record = Self::build_record(draft, pending, session)?;
        let token = session
            .access_token()
            .ok_or_else(|| AppError::precondition(SUBMIT_PRECONDITION_MESSAGE))?;

        log::info!("📡 Guardando hotspot '{}' en {}", record.ssid, LatLng::new(record.lat, record.lng).display_short());
        let created = source.insert(&record, token).await?;
        log::info!("✅ Hotspot creado: {}", created.id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::fixtures::session;
    use crate::services::mock::MockHotspots;
    use serde_json::json;

    fn signed_in() -> SessionState {
        SessionState::from_session(Some(session("user-1", Some("Ana"))))
    }

    fn cafe_net() -> AddSpotDraft {
        AddSpotDraft {
            ssid: "  CafeNet ".into(),
            notes: String::new(),
            strength: SignalStrength::new(4).unwrap(),
            freq: FrequencyBand::parse("5").unwrap(),
        }
    }

    #[test]
    fn submit_button_label_tracks_in_flight_insert() {
        assert_eq!(submit_label(false), "Submit Spot");
        assert_eq!(submit_label(true), "Submitting...");
    }

    #[test]
    fn draft_defaults() {
        let draft = AddSpotDraft::default();
        assert_eq!(draft.strength.level(), 3);
        assert_eq!(draft.freq, FrequencyBand::Ghz2_4);
        assert!(draft.ssid.is_empty());
    }

    #[test]
    fn open_without_position_is_rejected() {
        let err = AddSpotViewModel::can_open(None, &signed_in()).unwrap_err();
        assert_eq!(err.user_message(), NO_POSITION_MESSAGE);
    }

    #[test]
    fn open_after_click_succeeds() {
        let at = LatLng::new(13.05, 80.27);
        assert_eq!(AddSpotViewModel::can_open(Some(at), &signed_in()), Ok(at));
        assert!(AddSpotViewModel::can_open(Some(at), &SessionState::Anonymous).is_err());
    }

    #[tokio::test]
    async fn anonymous_submit_never_reaches_backend() {
        let source = MockHotspots::new(vec![]);
        let result = AddSpotViewModel::submit(
            &source,
            &cafe_net(),
            Some(LatLng::new(13.05, 80.27)),
            &SessionState::Anonymous,
        )
        .await;

        assert_eq!(result.unwrap_err().user_message(), SUBMIT_PRECONDITION_MESSAGE);
        assert!(source.inserts.borrow().is_empty());
    }

    #[tokio::test]
    async fn submit_without_position_never_reaches_backend() {
        let source = MockHotspots::new(vec![]);
        let result = AddSpotViewModel::submit(&source, &cafe_net(), None, &signed_in()).await;
        assert!(matches!(result, Err(AppError::Precondition(_))));
        assert!(source.inserts.borrow().is_empty());
    }

    #[tokio::test]
    async fn cafe_net_is_inserted_once_with_user_token() {
        let source = MockHotspots::new(vec![]);
        let created = AddSpotViewModel::submit(
            &source,
            &cafe_net(),
            Some(LatLng::new(13.05, 80.27)),
            &signed_in(),
        )
        .await
        .unwrap();

        let inserts = source.inserts.borrow();
        assert_eq!(inserts.len(), 1);
        let (body, token) = &inserts[0];
        assert_eq!(token, "token-user-1");
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "lat": 13.05,
                "lng": 80.27,
                "ssid": "CafeNet",
                "strength": 4,
                "freq": "5",
                "notes": null,
                "user_id": "user-1"
            })
        );
        assert_eq!(created.ssid, "CafeNet");
    }

    #[tokio::test]
    async fn backend_failure_is_returned_verbatim() {
        let source = MockHotspots::new(vec![]);
        *source.insert_error.borrow_mut() =
            Some(AppError::backend(403, "new row violates row-level security policy"));
        let draft = cafe_net();

        let err = AddSpotViewModel::submit(&source, &draft, Some(LatLng::new(1.0, 2.0)), &signed_in())
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "new row violates row-level security policy");
        assert_eq!(draft, cafe_net());
    }

    #[test]
    fn blank_ssid_and_notes() {
        let mut draft = AddSpotDraft::default();
        draft.ssid = "   ".into();
        let err = AddSpotViewModel::build_record(&draft, Some(LatLng::new(0.0, 0.0)), &signed_in()).unwrap_err();
        assert_eq!(err.user_message(), SSID_REQUIRED_MESSAGE);

        draft.ssid = "Lib".into();
        draft.notes = "  fast upstairs ".into();
        let body = AddSpotViewModel::build_record(&draft, Some(LatLng::new(0.0, 0.0)), &signed_in()).unwrap();
        assert_eq!(body.notes.as_deref(), Some("fast upstairs"));
    }
}
