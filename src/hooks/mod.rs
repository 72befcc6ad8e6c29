pub mod session_context;
pub mod use_hotspots;
pub mod use_map;
pub mod use_map_settings;
pub mod use_session;

pub use session_context::{SessionContextProvider, SessionHandle};
pub use use_hotspots::{use_hotspots, SharedSource, UseHotspotsHandle};
pub use use_map::{use_map, UseMapHandle, UseMapOptions};
pub use use_map_settings::{use_map_settings, MapSettingsAction, UseMapSettingsHandle};
pub use use_session::{use_session, UseSessionHandle};
