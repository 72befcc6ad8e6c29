// Módulo de mapas: estado de ajustes (puro) + renderizador Leaflet (wasm)

pub mod basemap;
pub mod color_profile;
pub mod settings;
pub mod traits;
pub mod web;

pub use basemap::Basemap;
pub use color_profile::{ColorProfileId, HexColor, Palette, FALLBACK_COLOR};
pub use settings::MapSettings;
pub use traits::{MapError, MapRenderer, PopupContent, SpotOverlay, SpotSync};
pub use web::{LeafletMap, MapHandlers};
