// ============================================================================
// SESSION CONTEXT - Compartir estado de sesión entre componentes
// ============================================================================
// Usa Context API de Yew para compartir el SessionStore globalmente.
// El provider arranca el store al montar y lo para al desmontar.
// ============================================================================

use std::rc::Rc;
use yew::prelude::*;

use crate::models::SessionState;
use crate::stores::SessionStore;

/// Lo que ven los consumidores: valor actual + acceso al store
#[derive(Clone)]
pub struct SessionHandle {
    pub store: Rc<SessionStore>,
    pub state: SessionState,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && self.state == other.state
    }
}

#[derive(Properties)]
pub struct SessionContextProviderProps {
    pub store: Rc<SessionStore>,
    pub children: Children,
}

impl PartialEq for SessionContextProviderProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && self.children == other.children
    }
}

/// Provider component que envuelve la app y proporciona el estado de sesión
#[function_component(SessionContextProvider)]
pub fn session_context_provider(props: &SessionContextProviderProps) -> Html {
    let state = use_state(|| props.store.current());

    {
        let store = props.store.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            let subscription = {
                let state = state.clone();
                store.subscribe(move |current| state.set(current.clone()))
            };

            let starting = store.clone();
            wasm_bindgen_futures::spawn_local(async move {
                starting.start().await;
            });

            move || {
                drop(subscription);
                store.stop();
            }
        });
    }

    let handle = SessionHandle {
        store: props.store.clone(),
        state: (*state).clone(),
    };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<SessionHandle>>
    }
}
