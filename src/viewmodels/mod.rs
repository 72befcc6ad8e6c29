pub mod add_spot_viewmodel;
pub mod auth_viewmodel;
pub mod map_viewmodel;

pub use add_spot_viewmodel::{AddSpotDraft, AddSpotViewModel};
pub use auth_viewmodel::{AuthPanelState, AuthViewModel, LoginForm, SignUpForm, SignUpResult};
pub use map_viewmodel::MapViewModel;
