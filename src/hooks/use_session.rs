use std::rc::Rc;
use yew::prelude::*;

use super::session_context::SessionHandle;
use crate::models::SessionState;
use crate::services::AuthBackend;

#[derive(Clone)]
pub struct UseSessionHandle {
    pub state: SessionState,
    /// None fuera del SessionContextProvider
    pub auth: Option<Rc<dyn AuthBackend>>,
}

/// Sesión actual desde el contexto (anónima si no hay provider)
#[hook]
pub fn use_session() -> UseSessionHandle {
    match use_context::<SessionHandle>() {
        Some(ctx) => UseSessionHandle {
            state: ctx.state.clone(),
            auth: Some(ctx.store.auth()),
        },
        None => {
            log::warn!("⚠️ use_session fuera de SessionContextProvider");
            UseSessionHandle {
                state: SessionState::Anonymous,
                auth: None,
            }
        }
    }
}
