// ============================================================================
// LEAFLET FFI - Bindings al global `L` de Leaflet
// ============================================================================
// Solo wrappers para funciones JS - Sin estado, sin lógica
// ============================================================================

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    /// L.Map
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn create_map(container_id: &str, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = on)]
    pub fn on_map(this: &Map, event: &str, handler: &Function) -> Map;

    #[wasm_bindgen(method, js_name = getContainer)]
    pub fn get_container(this: &Map) -> HtmlElement;

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_map(this: &Map);

    /// L.Layer
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_layer(this: &Layer);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on_layer(this: &Layer, event: &str, handler: &Function) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Layer, content: &HtmlElement) -> Layer;

    /// Solo en L.Path (círculos)
    #[wasm_bindgen(method, js_name = setStyle)]
    pub fn set_style(this: &Layer, style: &JsValue) -> Layer;

    /// Solo en L.Marker
    #[wasm_bindgen(method, js_name = setIcon)]
    pub fn set_icon(this: &Layer, icon: &JsValue) -> Layer;

    /// L.LayerGroup
    #[wasm_bindgen(extends = Layer)]
    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &LayerGroup, layer: &Layer) -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    pub fn clear_layers(this: &LayerGroup) -> LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = circle)]
    pub fn circle(center: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn marker(position: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    pub fn div_icon(options: &JsValue) -> JsValue;
}

/// `[lat, lng]` como array JS
pub fn lat_lng(lat: f64, lng: f64) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(lat));
    array.push(&JsValue::from_f64(lng));
    array.into()
}

/// Lee `event.latlng` de un evento de click de Leaflet
pub fn event_lat_lng(event: &JsValue) -> Option<(f64, f64)> {
    let latlng = js_sys::Reflect::get(event, &JsValue::from_str("latlng")).ok()?;
    let lat = js_sys::Reflect::get(&latlng, &JsValue::from_str("lat")).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(&latlng, &JsValue::from_str("lng")).ok()?.as_f64()?;
    Some((lat, lng))
}

/// ¿Está cargado Leaflet en la página?
pub fn leaflet_available() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("L")).ok())
        .map(|l| !l.is_undefined())
        .unwrap_or(false)
}
