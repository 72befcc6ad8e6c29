use thiserror::Error;

use super::basemap::Basemap;
use crate::models::{HotspotId, LatLng};

/// Opacidad del hotspot seleccionado
pub const SELECTED_OPACITY: f64 = 0.8;
/// Opacidad del resto
pub const UNSELECTED_OPACITY: f64 = 0.3;
/// Grosor del borde de los círculos
pub const STROKE_WEIGHT: u32 = 2;
/// Diámetro del pin central en px
pub const PIN_SIZE_PX: u32 = 20;

/// Todo lo necesario para dibujar un hotspot (círculo + pin + popup)
#[derive(Debug, Clone, PartialEq)]
pub struct SpotOverlay {
    pub id: HotspotId,
    pub center: LatLng,
    pub radius_m: f64,
    pub color: String,
    pub opacity: f64,
    pub popup: PopupContent,
}

/// Texto plano del popup; se inserta como textContent
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl SpotOverlay {
    /// Mismo hotspot en el mismo sitio con el mismo popup (el estilo puede variar)
    fn same_layers(&self, other: &SpotOverlay) -> bool {
        self.id == other.id
            && self.center == other.center
            && self.radius_m == other.radius_m
            && self.popup == other.popup
    }
}

/// Cambio de estilo sobre un hotspot ya dibujado
#[derive(Debug, Clone, PartialEq)]
pub struct SpotRestyle {
    pub index: usize,
    /// Color u opacidad del círculo
    pub circle: bool,
    /// Color del pin
    pub pin: bool,
}

/// Cómo pasar de lo dibujado a la nueva lista de overlays
#[derive(Debug, Clone, PartialEq)]
pub enum SpotSync {
    /// Cambió la lista de hotspots: quitar todas las capas y redibujar
    Rebuild,
    /// Mismas capas; solo se tocan estilos (vacío = nada que hacer)
    Restyle(Vec<SpotRestyle>),
}

/// Quitar una capa de Leaflet cierra su popup, así que selección y perfil
/// de color se aplican sobre las capas existentes.
pub fn plan_spot_sync(drawn: &[SpotOverlay], next: &[SpotOverlay]) -> SpotSync {
    if drawn.len() != next.len() || drawn.iter().zip(next).any(|(a, b)| !a.same_layers(b)) {
        return SpotSync::Rebuild;
    }
    let changes = drawn
        .iter()
        .zip(next)
        .enumerate()
        .filter_map(|(index, (before, after))| {
            let pin = before.color != after.color;
            let circle = pin || before.opacity != after.opacity;
            circle.then_some(SpotRestyle { index, circle, pin })
        })
        .collect();
    SpotSync::Restyle(changes)
}

/// Trait común para renderizadores de mapas
pub trait MapRenderer {
    /// Cambiar la capa de teselas
    fn set_basemap(&mut self, basemap: Basemap) -> Result<(), MapError>;

    /// Llevar los hotspots dibujados a `spots`, redibujando solo si cambió la lista
    fn render_spots(&mut self, spots: &[SpotOverlay]) -> Result<(), MapError>;

    /// Mostrar (o quitar) el marcador de posición pendiente
    fn set_pending_marker(&mut self, position: Option<LatLng>) -> Result<(), MapError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("Leaflet is not loaded")]
    LibraryMissing,
    #[error("DOM error: {0}")]
    Dom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay(id: &str, color: &str, opacity: f64) -> SpotOverlay {
        SpotOverlay {
            id: HotspotId::new(id),
            center: LatLng::new(13.05, 80.27),
            radius_m: 30.0,
            color: color.to_string(),
            opacity,
            popup: PopupContent {
                title: format!("SSID: net-{}", id),
                lines: vec!["Strength: 4/5".into()],
            },
        }
    }

    #[test]
    fn selecting_a_spot_only_touches_circles() {
        let drawn = vec![overlay("1", "#214475", UNSELECTED_OPACITY), overlay("2", "#1E8A96", UNSELECTED_OPACITY)];
        let next = vec![overlay("1", "#214475", SELECTED_OPACITY), overlay("2", "#1E8A96", UNSELECTED_OPACITY)];

        assert_eq!(
            plan_spot_sync(&drawn, &next),
            SpotSync::Restyle(vec![SpotRestyle { index: 0, circle: true, pin: false }])
        );
    }

    #[test]
    fn new_palette_recolors_pins_in_place() {
        let drawn = vec![overlay("1", "#214475", UNSELECTED_OPACITY)];
        let next = vec![overlay("1", "#F4D88A", UNSELECTED_OPACITY)];

        assert_eq!(
            plan_spot_sync(&drawn, &next),
            SpotSync::Restyle(vec![SpotRestyle { index: 0, circle: true, pin: true }])
        );
    }

    #[test]
    fn unchanged_overlays_need_nothing() {
        let drawn = vec![overlay("1", "#214475", UNSELECTED_OPACITY)];
        assert_eq!(plan_spot_sync(&drawn, &drawn.clone()), SpotSync::Restyle(vec![]));
    }

    #[test]
    fn different_hotspot_list_is_redrawn() {
        let drawn = vec![overlay("1", "#214475", UNSELECTED_OPACITY)];
        let added = vec![drawn[0].clone(), overlay("2", "#214475", UNSELECTED_OPACITY)];
        assert_eq!(plan_spot_sync(&drawn, &added), SpotSync::Rebuild);
        assert_eq!(plan_spot_sync(&[], &drawn), SpotSync::Rebuild);

        let mut moved = drawn.clone();
        moved[0].center = LatLng::new(13.06, 80.27);
        assert_eq!(plan_spot_sync(&drawn, &moved), SpotSync::Rebuild);
    }
}
