use std::rc::Rc;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::hooks::{use_map, UseMapOptions};
use crate::maps::{MapRenderer, MapSettings};
use crate::models::{HotspotId, HotspotRecord, LatLng};
use crate::utils::constants::MAP_CONTAINER_ID;
use crate::viewmodels::MapViewModel;

#[derive(Properties, PartialEq)]
pub struct MapViewProps {
    pub hotspots: Rc<Vec<HotspotRecord>>,
    pub settings: MapSettings,
    pub selected: Option<HotspotId>,
    pub pending: Option<LatLng>,
    pub on_map_click: Callback<LatLng>,
    pub on_spot_click: Callback<HotspotId>,
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let map_config = &CONFIG.map_config;
    let handle = use_map(UseMapOptions {
        container_id: MAP_CONTAINER_ID,
        center: map_config.default_center(),
        zoom: map_config.default_zoom,
        on_map_click: props.on_map_click.clone(),
        on_spot_click: props.on_spot_click.clone(),
    });

    // Basemap
    {
        let map = handle.map.clone();
        use_effect_with((handle.ready, props.settings.basemap), move |(ready, basemap)| {
            if *ready {
                if let Some(leaflet) = map.borrow_mut().as_mut() {
                    if let Err(e) = leaflet.set_basemap(*basemap) {
                        log::error!("❌ Error cambiando basemap: {}", e);
                    }
                }
            }
            || ()
        });
    }

    // Hotspots (colores del perfil activo + selección)
    {
        let map = handle.map.clone();
        let deps = (
            handle.ready,
            props.hotspots.clone(),
            props.settings.active_palette(),
            props.selected.clone(),
        );
        use_effect_with(deps, move |(ready, hotspots, palette, selected)| {
            if *ready {
                let overlays = MapViewModel::build_overlays(hotspots, palette, selected.as_ref());
                if let Some(leaflet) = map.borrow_mut().as_mut() {
                    if let Err(e) = leaflet.render_spots(&overlays) {
                        log::error!("❌ Error dibujando hotspots: {}", e);
                    }
                }
            }
            || ()
        });
    }

    // Marcador de posición pendiente
    {
        let map = handle.map.clone();
        use_effect_with((handle.ready, props.pending), move |(ready, pending)| {
            if *ready {
                if let Some(leaflet) = map.borrow_mut().as_mut() {
                    if let Err(e) = leaflet.set_pending_marker(*pending) {
                        log::error!("❌ Error con el marcador pendiente: {}", e);
                    }
                }
            }
            || ()
        });
    }

    html! {
        <div id={MAP_CONTAINER_ID} class="map-container"></div>
    }
}
