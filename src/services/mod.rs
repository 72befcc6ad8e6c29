pub mod supabase_client;
pub mod auth_service;
pub mod hotspot_service;
pub mod geolocation;

#[cfg(test)]
pub(crate) mod mock;

pub use supabase_client::SupabaseClient;
pub use auth_service::{AuthBackend, SupabaseAuth};
pub use hotspot_service::{HotspotSource, SupabaseHotspots};
pub use geolocation::GeolocationError;
