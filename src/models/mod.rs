pub mod coordinates;
pub mod hotspot;
pub mod auth;

pub use coordinates::LatLng;
pub use hotspot::{FrequencyBand, HotspotId, HotspotRecord, NewHotspot, SignalStrength};
pub use auth::{AuthChange, AuthEvent, Session, SessionState, SignUpOutcome, User, UserMetadata};
