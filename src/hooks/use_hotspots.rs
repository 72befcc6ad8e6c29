// ============================================================================
// USE HOTSPOTS HOOK - Lista de hotspots del backend
// ============================================================================
// Un fetch al montar y otro por cada `reload`. Sin reintentos ni UI de error:
// si falla se loguea y la lista queda como estaba.
// ============================================================================

use std::rc::Rc;
use yew::prelude::*;

use crate::models::HotspotRecord;
use crate::services::HotspotSource;
use crate::viewmodels::MapViewModel;

/// Fuente de hotspots compartida entre componentes (igualdad por puntero)
#[derive(Clone)]
pub struct SharedSource(pub Rc<dyn HotspotSource>);

impl PartialEq for SharedSource {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Clone)]
pub struct UseHotspotsHandle {
    pub hotspots: Rc<Vec<HotspotRecord>>,
    pub reload: Callback<()>,
}

#[hook]
pub fn use_hotspots(source: SharedSource) -> UseHotspotsHandle {
    let hotspots = use_state(|| Rc::new(Vec::<HotspotRecord>::new()));
    // El callback se crea una vez; la lista vigente se lee de aquí
    let latest = use_mut_ref(|| Rc::new(Vec::<HotspotRecord>::new()));

    let reload = {
        let hotspots = hotspots.clone();
        let latest = latest.clone();
        use_callback(source, move |_: (), source| {
            let hotspots = hotspots.clone();
            let latest = latest.clone();
            let source = source.0.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let current = latest.borrow().clone();
                let rows = Rc::new(MapViewModel::reload(source.as_ref(), &current).await);
                *latest.borrow_mut() = rows.clone();
                hotspots.set(rows);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    UseHotspotsHandle {
        hotspots: (*hotspots).clone(),
        reload,
    }
}
