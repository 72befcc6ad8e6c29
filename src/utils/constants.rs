/// Tabla de hotspots en el backend
pub const HOTSPOTS_TABLE: &str = "wifi_spots";

/// Clave de localStorage donde se persiste la sesión de auth
pub const STORAGE_KEY_AUTH_SESSION: &str = "wifiMapper_authSession";

/// Refrescar el token este tiempo antes de que caduque
pub const SESSION_REFRESH_MARGIN_SECS: i64 = 60;

/// Color de acento de la marca (marcador pendiente, botones)
pub const BRAND_GREEN: &str = "#63ff0f";

/// Contenedor del mapa en el DOM
pub const MAP_CONTAINER_ID: &str = "map";
