// ============================================================================
// USE MAP SETTINGS HOOK - Basemap + perfil de color
// ============================================================================
// Reducer sobre MapSettings. También escucha cambios de
// `prefers-color-scheme` para el basemap por defecto.
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::maps::{Basemap, ColorProfileId, HexColor, MapSettings};
use crate::models::SignalStrength;
use crate::utils::prefers_dark_scheme;

#[derive(Debug, Clone, PartialEq)]
pub enum MapSettingsAction {
    SelectBasemap(Basemap),
    /// Quitar override; lleva la preferencia actual del sistema
    UseSystemDefault { prefers_dark: bool },
    SystemThemeChanged { prefers_dark: bool },
    SelectProfile(ColorProfileId),
    SetCustomColor(SignalStrength, HexColor),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettingsState(pub MapSettings);

impl Reducible for MapSettingsState {
    type Action = MapSettingsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut settings = self.0.clone();
        match action {
            MapSettingsAction::SelectBasemap(basemap) => settings.select_basemap(basemap),
            MapSettingsAction::UseSystemDefault { prefers_dark } => settings.use_system_default(prefers_dark),
            MapSettingsAction::SystemThemeChanged { prefers_dark } => settings.system_theme_changed(prefers_dark),
            MapSettingsAction::SelectProfile(profile) => settings.select_profile(profile),
            MapSettingsAction::SetCustomColor(level, color) => settings.set_custom_color(level, color),
        }
        if settings == self.0 {
            self
        } else {
            Rc::new(MapSettingsState(settings))
        }
    }
}

#[derive(Clone)]
pub struct UseMapSettingsHandle {
    pub settings: MapSettings,
    pub dispatch: Callback<MapSettingsAction>,
}

#[hook]
pub fn use_map_settings() -> UseMapSettingsHandle {
    let state = use_reducer(|| MapSettingsState(MapSettings::new(prefers_dark_scheme())));

    // Seguir al esquema del sistema mientras no haya override
    {
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            let query = web_sys::window()
                .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
                .flatten();
            let listener = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                dispatcher.dispatch(MapSettingsAction::SystemThemeChanged {
                    prefers_dark: prefers_dark_scheme(),
                });
            }) as Box<dyn FnMut(web_sys::Event)>);

            if let Some(query) = &query {
                if let Err(e) = query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref()) {
                    log::warn!("⚠️ No se pudo escuchar prefers-color-scheme: {:?}", e);
                }
            }

            move || {
                if let Some(query) = query {
                    let _ = query.remove_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
                }
                drop(listener);
            }
        });
    }

    let dispatch = {
        let dispatcher = state.dispatcher();
        Callback::from(move |action: MapSettingsAction| dispatcher.dispatch(action))
    };

    UseMapSettingsHandle {
        settings: state.0.clone(),
        dispatch,
    }
}
