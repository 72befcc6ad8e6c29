use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::Callback;

use super::basemap::Basemap;
use super::traits::{
    plan_spot_sync, MapError, MapRenderer, PopupContent, SpotOverlay, SpotSync, PIN_SIZE_PX, STROKE_WEIGHT,
};
use crate::models::{HotspotId, LatLng};
use crate::utils::constants::BRAND_GREEN;
use crate::utils::leaflet_ffi::{self as leaflet, Layer, LayerGroup, Map};

/// Callbacks hacia Yew. Se reemplazan en cada render para no leer estado viejo.
pub struct MapHandlers {
    pub on_map_click: Callback<LatLng>,
    pub on_spot_click: Callback<HotspotId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    zoom_control: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleOptions<'a> {
    radius: f64,
    color: &'a str,
    fill_color: &'a str,
    weight: u32,
    opacity: f64,
    fill_opacity: f64,
    // El click en un círculo selecciona el hotspot, no es un click en el mapa
    bubbling_mouse_events: bool,
}

/// Subconjunto de CircleOptions que cambia con selección y perfil
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleStyle<'a> {
    color: &'a str,
    fill_color: &'a str,
    opacity: f64,
    fill_opacity: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DivIconOptions {
    class_name: &'static str,
    html: String,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, MapError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| MapError::Dom(e.to_string()))
}

/// Capas de un hotspot dibujado y el overlay con el que se crearon
struct DrawnSpot {
    overlay: SpotOverlay,
    circle: Layer,
    pin: Layer,
    _on_click: Closure<dyn FnMut(JsValue)>,
}

/// Renderizador de mapas para web usando Leaflet
pub struct LeafletMap {
    map: Map,
    tiles: Option<Layer>,
    spots: LayerGroup,
    drawn: Vec<DrawnSpot>,
    pending: Option<Layer>,
    handlers: Rc<RefCell<MapHandlers>>,
    _map_click: Closure<dyn FnMut(JsValue)>,
}

impl LeafletMap {
    /// Crear el mapa dentro de `container_id` y aplicar el estilo de los controles
    pub fn mount(container_id: &str, center: LatLng, zoom: f64, handlers: MapHandlers) -> Result<Self, MapError> {
        if !leaflet::leaflet_available() {
            return Err(MapError::LibraryMissing);
        }
        log::info!("🗺️ Inicializando Leaflet en #{}", container_id);

        let map = leaflet::create_map(container_id, &to_js(&MapOptions { zoom_control: true })?);
        map.set_view(&leaflet::lat_lng(center.lat, center.lng), zoom);

        let spots = leaflet::layer_group();
        spots.add_to(&map);

        let handlers = Rc::new(RefCell::new(handlers));
        let map_click = {
            let handlers = handlers.clone();
            Closure::wrap(Box::new(move |event: JsValue| {
                if let Some((lat, lng)) = leaflet::event_lat_lng(&event) {
                    let callback = handlers.borrow().on_map_click.clone();
                    callback.emit(LatLng::new(lat, lng));
                }
            }) as Box<dyn FnMut(JsValue)>)
        };
        map.on_map("click", map_click.as_ref().unchecked_ref());

        style_zoom_controls(&map.get_container());

        Ok(Self {
            map,
            tiles: None,
            spots,
            drawn: Vec::new(),
            pending: None,
            handlers,
            _map_click: map_click,
        })
    }

    pub fn set_handlers(&self, handlers: MapHandlers) {
        *self.handlers.borrow_mut() = handlers;
    }

    fn draw_spot(&self, spot: &SpotOverlay) -> Result<DrawnSpot, MapError> {
        let center = leaflet::lat_lng(spot.center.lat, spot.center.lng);

        let circle = leaflet::circle(
            &center,
            &to_js(&CircleOptions {
                radius: spot.radius_m,
                color: &spot.color,
                fill_color: &spot.color,
                weight: STROKE_WEIGHT,
                opacity: spot.opacity,
                fill_opacity: spot.opacity,
                bubbling_mouse_events: false,
            })?,
        );

        let pin = leaflet::marker(&center, &marker_options(&pin_icon(&spot.color)?)?);
        pin.bind_popup(&popup_element(&spot.popup)?);

        let on_click = {
            let handlers = self.handlers.clone();
            let id = spot.id.clone();
            Closure::wrap(Box::new(move |_event: JsValue| {
                let callback = handlers.borrow().on_spot_click.clone();
                callback.emit(id.clone());
            }) as Box<dyn FnMut(JsValue)>)
        };
        circle.on_layer("click", on_click.as_ref().unchecked_ref());
        pin.on_layer("click", on_click.as_ref().unchecked_ref());

        self.spots.add_layer(&circle);
        self.spots.add_layer(&pin);

        Ok(DrawnSpot {
            overlay: spot.clone(),
            circle,
            pin,
            _on_click: on_click,
        })
    }

    fn redraw_spots(&mut self, spots: &[SpotOverlay]) -> Result<(), MapError> {
        self.spots.clear_layers();
        self.drawn.clear();
        for spot in spots {
            let drawn = self.draw_spot(spot)?;
            self.drawn.push(drawn);
        }
        log::debug!("📍 {} hotspots dibujados", spots.len());
        Ok(())
    }
}

impl MapRenderer for LeafletMap {
    fn set_basemap(&mut self, basemap: Basemap) -> Result<(), MapError> {
        if let Some(old) = self.tiles.take() {
            old.remove_layer();
        }
        let options = to_js(&TileOptions {
            attribution: basemap.attribution(),
            max_zoom: 19,
        })?;
        let layer = leaflet::tile_layer(basemap.url_template(), &options);
        layer.add_to(&self.map);
        self.tiles = Some(layer);
        log::info!("🧱 Basemap: {}", basemap.name());
        Ok(())
    }

    fn render_spots(&mut self, spots: &[SpotOverlay]) -> Result<(), MapError> {
        let previous: Vec<SpotOverlay> = self.drawn.iter().map(|d| d.overlay.clone()).collect();
        let changes = match plan_spot_sync(&previous, spots) {
            SpotSync::Rebuild => return self.redraw_spots(spots),
            SpotSync::Restyle(changes) => changes,
        };

        for change in changes {
            let (Some(drawn), Some(next)) = (self.drawn.get_mut(change.index), spots.get(change.index)) else {
                continue;
            };
            if change.circle {
                drawn.circle.set_style(&to_js(&CircleStyle {
                    color: &next.color,
                    fill_color: &next.color,
                    opacity: next.opacity,
                    fill_opacity: next.opacity,
                })?);
            }
            if change.pin {
                drawn.pin.set_icon(&pin_icon(&next.color)?);
            }
            drawn.overlay = next.clone();
        }
        Ok(())
    }

    fn set_pending_marker(&mut self, position: Option<LatLng>) -> Result<(), MapError> {
        if let Some(old) = self.pending.take() {
            old.remove_layer();
        }
        if let Some(pos) = position {
            let marker = leaflet::marker(
                &leaflet::lat_lng(pos.lat, pos.lng),
                &marker_options(&pin_icon(BRAND_GREEN)?)?,
            );
            marker.add_to(&self.map);
            self.pending = Some(marker);
        }
        Ok(())
    }
}

impl Drop for LeafletMap {
    fn drop(&mut self) {
        // Quita listeners antes de soltar los closures
        self.map.remove_map();
    }
}

fn pin_icon(color: &str) -> Result<JsValue, MapError> {
    let options = DivIconOptions {
        class_name: "wifi-pin",
        html: format!(
            "<div style=\"background:{color};width:{size}px;height:{size}px;border:2px solid #fff;border-radius:50%;box-sizing:border-box;\"></div>",
            color = color,
            size = PIN_SIZE_PX,
        ),
        icon_size: [PIN_SIZE_PX, PIN_SIZE_PX],
        icon_anchor: [PIN_SIZE_PX / 2, PIN_SIZE_PX / 2],
    };
    Ok(leaflet::div_icon(&to_js(&options)?))
}

fn marker_options(icon: &JsValue) -> Result<JsValue, MapError> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &JsValue::from_str("icon"), icon)
        .map_err(|_| MapError::Dom("marker options".into()))?;
    Ok(options.into())
}

/// Popup como DOM con textContent (el SSID y las notas vienen de usuarios)
fn popup_element(content: &PopupContent) -> Result<HtmlElement, MapError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| MapError::Dom("no document".into()))?;
    let create = |tag: &str| {
        document
            .create_element(tag)
            .map_err(|_| MapError::Dom(format!("create <{}>", tag)))
    };

    let root = create("div")?;
    root.set_class_name("spot-popup");

    let title = create("strong")?;
    title.set_text_content(Some(&content.title));
    root.append_child(&title).map_err(|_| MapError::Dom("append".into()))?;

    for line in &content.lines {
        let row = create("div")?;
        row.set_text_content(Some(line));
        root.append_child(&row).map_err(|_| MapError::Dom("append".into()))?;
    }

    root.dyn_into::<HtmlElement>()
        .map_err(|_| MapError::Dom("popup root".into()))
}

/// Estilo de marca para los botones +/- (solo dentro del contenedor del mapa)
fn style_zoom_controls(container: &HtmlElement) {
    let Ok(buttons) = container.query_selector_all(".leaflet-control-zoom a") else {
        return;
    };
    for i in 0..buttons.length() {
        let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let style = button.style();
        for (property, value) in [
            ("background-color", BRAND_GREEN),
            ("color", "#000"),
            ("border", "1px solid #000"),
            ("font-weight", "bold"),
            ("font-size", "18px"),
        ] {
            if let Err(e) = style.set_property(property, value) {
                log::warn!("⚠️ No se pudo aplicar {} al control de zoom: {:?}", property, e);
            }
        }
    }
}
