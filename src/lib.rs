// ============================================================================
// WIFI MAPPER - FRONTEND YEW (RUST + WASM)
// ============================================================================
// Capas:
// - Components: Yew function components (sin lógica de negocio)
// - Hooks: puente entre componentes y stores/viewmodels
// - ViewModels: lógica de UI pura y testeable
// - Services: SOLO comunicación (Supabase, geolocalización)
// - Stores/State: estado compartido con Rc<RefCell> + suscripciones
// - Maps: ajustes del mapa + renderizador Leaflet
// ============================================================================

pub mod components;
pub mod config;
pub mod error;
pub mod hooks;
pub mod maps;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
pub mod viewmodels;

pub use components::App;
