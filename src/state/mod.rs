// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;

pub use reactivity::{EventBus, ReactiveState, Subscription};
