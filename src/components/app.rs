// ============================================================================
// APP - Raíz: crea backends, provee la sesión y coordina mapa + formularios
// ============================================================================

use std::rc::Rc;
use yew::prelude::*;

use super::{AddSpotForm, AuthPanel, MapView, SettingsPopup};
use crate::config::CONFIG;
use crate::hooks::{
    use_hotspots, use_map_settings, use_session, SessionContextProvider, SharedSource,
};
use crate::models::{HotspotId, LatLng};
use crate::services::geolocation::current_position;
use crate::services::{AuthBackend, SupabaseAuth, SupabaseClient, SupabaseHotspots};
use crate::stores::SessionStore;
use crate::utils::alert;
use crate::viewmodels::add_spot_viewmodel::LOGIN_REQUIRED_MESSAGE;
use crate::viewmodels::{AddSpotViewModel, MapViewModel};

#[function_component(App)]
pub fn app() -> Html {
    let client = use_memo((), |_| SupabaseClient::from_config());
    let store = {
        let client = client.clone();
        use_memo((), move |_| {
            let auth: Rc<dyn AuthBackend> = SupabaseAuth::new((*client).clone());
            SessionStore::new(auth)
        })
    };
    let source = use_memo((), move |_| SharedSource(Rc::new(SupabaseHotspots::new((*client).clone()))));

    html! {
        <SessionContextProvider store={(*store).clone()}>
            <WifiMapper source={(*source).clone()} />
        </SessionContextProvider>
    }
}

#[derive(Properties, PartialEq)]
struct WifiMapperProps {
    source: SharedSource,
}

#[function_component(WifiMapper)]
fn wifi_mapper(props: &WifiMapperProps) -> Html {
    let session = use_session();
    let hotspots = use_hotspots(props.source.clone());
    let map_settings = use_map_settings();

    let pending = use_state(|| None::<LatLng>);
    let selected = use_state(|| None::<HotspotId>);
    let form_open = use_state(|| false);
    let locating = use_state(|| false);

    let authenticated = session.state.is_authenticated();

    let on_map_click = {
        let pending = pending.clone();
        let state = session.state.clone();
        Callback::from(move |at: LatLng| {
            if let Some(position) = MapViewModel::pending_from_click(&state, at) {
                log::debug!("📌 Posición pendiente: {}", position.display_short());
                pending.set(Some(position));
            }
        })
    };

    let on_spot_click = {
        let selected = selected.clone();
        Callback::from(move |id: HotspotId| selected.set(Some(id)))
    };

    let on_locate = {
        let pending = pending.clone();
        let form_open = form_open.clone();
        let locating = locating.clone();
        Callback::from(move |_e: MouseEvent| {
            if !authenticated {
                alert(LOGIN_REQUIRED_MESSAGE);
                return;
            }
            locating.set(true);
            let pending = pending.clone();
            let form_open = form_open.clone();
            let locating = locating.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = current_position(&CONFIG.geolocation_config).await;
                locating.set(false);
                match result {
                    Ok(position) => {
                        pending.set(Some(position));
                        form_open.set(true);
                    }
                    Err(e) => alert(&e.user_message()),
                }
            });
        })
    };

    let on_add = {
        let pending = pending.clone();
        let form_open = form_open.clone();
        let state = session.state.clone();
        Callback::from(move |_e: MouseEvent| match AddSpotViewModel::can_open(*pending, &state) {
            Ok(_) => form_open.set(true),
            Err(e) => alert(&e.user_message()),
        })
    };

    let on_form_close = {
        let form_open = form_open.clone();
        Callback::from(move |_| form_open.set(false))
    };

    let on_saved = {
        let form_open = form_open.clone();
        let pending = pending.clone();
        let reload = hotspots.reload.clone();
        Callback::from(move |_| {
            form_open.set(false);
            pending.set(None);
            reload.emit(());
        })
    };

    html! {
        <div class="app-shell">
            <MapView
                hotspots={hotspots.hotspots.clone()}
                settings={map_settings.settings.clone()}
                selected={(*selected).clone()}
                pending={*pending}
                on_map_click={on_map_click}
                on_spot_click={on_spot_click}
            />

            <div class="auth-corner">
                <AuthPanel />
            </div>

            if authenticated {
                <div class="locate-corner">
                    <button class="btn-outline" onclick={on_locate} disabled={*locating}>
                        { if *locating { "Getting Location..." } else { "Get Current Location" } }
                    </button>
                </div>
                <div class="add-spot-bar">
                    <button class="btn-primary btn-lg" onclick={on_add}>{"Add New WiFi Spot"}</button>
                </div>
            }

            <SettingsPopup settings={map_settings.settings.clone()} on_action={map_settings.dispatch.clone()} />

            if *form_open {
                <AddSpotForm
                    position={*pending}
                    source={props.source.clone()}
                    on_close={on_form_close}
                    on_saved={on_saved}
                />
            }
        </div>
    }
}
