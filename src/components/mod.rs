pub mod add_spot_form;
pub mod app;
pub mod auth_panel;
pub mod map;
pub mod settings_popup;

pub use add_spot_form::AddSpotForm;
pub use app::App;
pub use auth_panel::AuthPanel;
pub use map::MapView;
pub use settings_popup::SettingsPopup;
