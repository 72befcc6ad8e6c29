// ============================================================================
// USE MAP HOOK - Instancia de Leaflet ligada al ciclo de vida del componente
// ============================================================================
// Monta el mapa tras el primer render (el contenedor ya existe en el DOM),
// refresca los callbacks en cada render y destruye el mapa al desmontar.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use crate::maps::{LeafletMap, MapHandlers};
use crate::models::{HotspotId, LatLng};

pub type MapSlot = Rc<RefCell<Option<LeafletMap>>>;

#[derive(Clone, PartialEq)]
pub struct UseMapOptions {
    pub container_id: &'static str,
    pub center: LatLng,
    pub zoom: f64,
    pub on_map_click: Callback<LatLng>,
    pub on_spot_click: Callback<HotspotId>,
}

/// Handle del hook
#[derive(Clone)]
pub struct UseMapHandle {
    pub map: MapSlot,
    /// Cambia a true cuando Leaflet está montado
    pub ready: bool,
}

#[hook]
pub fn use_map(options: UseMapOptions) -> UseMapHandle {
    let map: MapSlot = use_mut_ref(|| None);
    let ready = use_state(|| false);

    {
        let map = map.clone();
        let ready = ready.clone();
        let options = options.clone();
        use_effect_with((), move |_| {
            let handlers = MapHandlers {
                on_map_click: options.on_map_click.clone(),
                on_spot_click: options.on_spot_click.clone(),
            };
            match LeafletMap::mount(options.container_id, options.center, options.zoom, handlers) {
                Ok(leaflet) => {
                    *map.borrow_mut() = Some(leaflet);
                    ready.set(true);
                    log::info!("✅ Mapa inicializado");
                }
                Err(e) => log::error!("❌ No se pudo inicializar el mapa: {}", e),
            }

            move || {
                map.borrow_mut().take();
            }
        });
    }

    // Callbacks frescos en cada render (leen la sesión actual, etc.)
    {
        let map = map.clone();
        let on_map_click = options.on_map_click.clone();
        let on_spot_click = options.on_spot_click.clone();
        use_effect(move || {
            if let Some(leaflet) = map.borrow().as_ref() {
                leaflet.set_handlers(MapHandlers {
                    on_map_click,
                    on_spot_click,
                });
            }
            || ()
        });
    }

    UseMapHandle {
        map,
        ready: *ready,
    }
}
