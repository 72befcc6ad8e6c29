// ============================================================================
// GEOLOCATION - Petición one-shot a navigator.geolocation
// ============================================================================

use futures::channel::oneshot;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::GeolocationConfig;
use crate::error::AppError;
use crate::models::LatLng;

/// Motivo del fallo, con el mensaje que ve el usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported by this browser.")]
    Unsupported,
    #[error("Unable to get your location. Location access was denied. Please enable location permissions and try again.")]
    PermissionDenied,
    #[error("Unable to get your location. Location information is unavailable.")]
    PositionUnavailable,
    #[error("Unable to get your location. Location request timed out. Please try again.")]
    Timeout,
    #[error("Unable to get your location. An unknown error occurred.")]
    Unknown,
}

impl GeolocationError {
    /// Códigos de GeolocationPositionError (1, 2, 3)
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unknown,
        }
    }
}

/// PositionOptions tal como las espera el navegador
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionOptionsJs {
    enable_high_accuracy: bool,
    timeout: u32,
    maximum_age: u32,
}

impl From<&GeolocationConfig> for PositionOptionsJs {
    fn from(cfg: &GeolocationConfig) -> Self {
        Self {
            enable_high_accuracy: cfg.enable_high_accuracy,
            timeout: cfg.timeout_ms,
            maximum_age: cfg.maximum_age_ms,
        }
    }
}

type Reply = Rc<RefCell<Option<oneshot::Sender<Result<LatLng, GeolocationError>>>>>;

fn number_at(value: &JsValue, path: &[&str]) -> Option<f64> {
    let mut current = value.clone();
    for key in path {
        current = js_sys::Reflect::get(&current, &JsValue::from_str(key)).ok()?;
    }
    current.as_f64()
}

/// Pide la posición actual una sola vez
pub async fn current_position(config: &GeolocationConfig) -> Result<LatLng, AppError> {
    request_position(config).await.map_err(AppError::from)
}

async fn request_position(config: &GeolocationConfig) -> Result<LatLng, GeolocationError> {
    let geolocation = web_sys::window()
        .map(|w| w.navigator())
        .and_then(|nav| nav.geolocation().ok())
        .ok_or(GeolocationError::Unsupported)?;

    let (tx, rx) = oneshot::channel();
    let reply: Reply = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let reply = reply.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |position: JsValue| {
            let result = match (
                number_at(&position, &["coords", "latitude"]),
                number_at(&position, &["coords", "longitude"]),
            ) {
                (Some(lat), Some(lng)) => Ok(LatLng::new(lat, lng)),
                _ => Err(GeolocationError::PositionUnavailable),
            };
            if let Some(tx) = reply.borrow_mut().take() {
                let _ = tx.send(result);
            }
        })
    };

    let on_error = {
        let reply = reply.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |error: JsValue| {
            let code = number_at(&error, &["code"]).unwrap_or(0.0) as u16;
            if let Some(tx) = reply.borrow_mut().take() {
                let _ = tx.send(Err(GeolocationError::from_code(code)));
            }
        })
    };

    let options: web_sys::PositionOptions = serde_wasm_bindgen::to_value(&PositionOptionsJs::from(config))
        .map_err(|_| GeolocationError::Unknown)?
        .unchecked_into();

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        )
        .map_err(|_| GeolocationError::Unsupported)?;

    // Los closures viven hasta que llega la respuesta
    let result = rx.await.unwrap_or(Err(GeolocationError::Unknown));
    drop(on_success);
    drop(on_error);

    match &result {
        Ok(pos) => log::info!("📍 Ubicación obtenida: ({}, {})", pos.lat, pos.lng),
        Err(e) => log::warn!("⚠️ Geolocalización fallida: {:?}", e),
    }
    result
}
