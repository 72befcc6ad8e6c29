use serde::{Deserialize, Serialize};

use crate::models::LatLng;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub enable_logging: bool,
    pub map_config: MapConfig,
    pub geolocation_config: GeolocationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: String::new(),
            enable_logging: true,
            map_config: MapConfig::default(),
            geolocation_config: GeolocationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Chennai
        Self {
            default_center_lat: 13.0827,
            default_center_lng: 80.2707,
            default_zoom: 13.0,
        }
    }
}

impl MapConfig {
    pub fn default_center(&self) -> LatLng {
        LatLng::new(self.default_center_lat, self.default_center_lng)
    }
}

/// Opciones de la petición one-shot de geolocalización
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: 10_000,
            maximum_age_ms: 60_000,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            supabase_url: option_env!("SUPABASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.supabase_url),
            supabase_anon_key: option_env!("SUPABASE_ANON_KEY")
                .unwrap_or("").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            map_config: MapConfig {
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .unwrap_or("13.0827").parse().unwrap_or(13.0827),
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .unwrap_or("80.2707").parse().unwrap_or(80.2707),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .unwrap_or("13").parse().unwrap_or(13.0),
            },
            geolocation_config: GeolocationConfig {
                enable_high_accuracy: true,
                timeout_ms: option_env!("GEOLOCATION_TIMEOUT_MS")
                    .unwrap_or("10000").parse().unwrap_or(10_000),
                maximum_age_ms: option_env!("GEOLOCATION_MAX_AGE_MS")
                    .unwrap_or("60000").parse().unwrap_or(60_000),
            },
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
