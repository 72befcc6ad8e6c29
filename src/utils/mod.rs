// Utils compartidos

pub mod constants;
pub mod dialogs;
pub mod leaflet_ffi;
pub mod storage;
pub mod theme;

pub use constants::*;
pub use dialogs::alert;
pub use storage::{load_from_storage, remove_from_storage, save_to_storage};
pub use theme::prefers_dark_scheme;
