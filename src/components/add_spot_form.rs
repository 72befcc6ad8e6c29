use yew::prelude::*;

use crate::hooks::{use_session, SharedSource};
use crate::models::{FrequencyBand, LatLng, SignalStrength};
use crate::utils::alert;
use crate::viewmodels::add_spot_viewmodel::{submit_label, SUCCESS_MESSAGE};
use crate::viewmodels::{AddSpotDraft, AddSpotViewModel};

#[derive(Properties, PartialEq)]
pub struct AddSpotFormProps {
    pub position: Option<LatLng>,
    pub source: SharedSource,
    pub on_close: Callback<()>,
    /// Insert correcto: el padre cierra el form y recarga la lista
    pub on_saved: Callback<()>,
}

#[function_component(AddSpotForm)]
pub fn add_spot_form(props: &AddSpotFormProps) -> Html {
    let session = use_session();
    let draft = use_state(AddSpotDraft::default);
    let submitting = use_state(|| false);

    let on_ssid = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                let mut next = (*draft).clone();
                next.ssid = input.value();
                draft.set(next);
            }
        })
    };
    let on_notes = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                let mut next = (*draft).clone();
                next.notes = input.value();
                draft.set(next);
            }
        })
    };
    let on_strength = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                let mut next = (*draft).clone();
                next.strength = SignalStrength::clamped(input.value().parse().unwrap_or(3));
                draft.set(next);
            }
        })
    };
    let on_freq = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                let mut next = (*draft).clone();
                next.freq = FrequencyBand::from_slider_index(input.value().parse().unwrap_or(0));
                draft.set(next);
            }
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let submitting = submitting.clone();
        let state = session.state.clone();
        let position = props.position;
        let source = props.source.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            // Precondiciones antes de tocar la red
            if let Err(err) = AddSpotViewModel::build_record(&draft, position, &state) {
                alert(&err.user_message());
                return;
            }

            submitting.set(true);
            let values = (*draft).clone();
            let state = state.clone();
            let source = source.clone();
            let submitting = submitting.clone();
            let on_saved = on_saved.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = AddSpotViewModel::submit(source.0.as_ref(), &values, position, &state).await;
                submitting.set(false);
                match result {
                    Ok(_) => {
                        alert(SUCCESS_MESSAGE);
                        on_saved.emit(());
                    }
                    Err(err) => {
                        log::error!("❌ Error guardando hotspot: {}", err);
                        alert(&err.user_message());
                    }
                }
            });
        })
    };

    let on_cancel = {
        let cb = props.on_close.clone();
        Callback::from(move |_e: MouseEvent| cb.emit(()))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    let location = props
        .position
        .map(|p| p.display_short())
        .unwrap_or_else(|| "No location selected".to_string());

    html! {
        <div class="modal-backdrop" onclick={on_cancel.clone()}>
            <div class="modal" onclick={stop}>
                <h2 class="modal-title">{"Add a New WiFi Spot"}</h2>
                <p class="modal-description">
                    {"Fill in the details for the new hotspot. The location is based on where you last clicked on the map."}
                </p>
                <p class="modal-location">{location}</p>
                <form class="spot-form" onsubmit={on_submit}>
                    <label for="ssid">{"SSID"}</label>
                    <input
                        id="ssid"
                        type="text"
                        placeholder="e.g., CafeCoffeeDay_Free"
                        value={draft.ssid.clone()}
                        oninput={on_ssid}
                        required=true
                    />

                    <label for="notes">{"Notes"}</label>
                    <input
                        id="notes"
                        type="text"
                        placeholder="Optional: e.g., Fast, near window"
                        value={draft.notes.clone()}
                        oninput={on_notes}
                    />

                    <label for="strength">{format!("Strength: {}", draft.strength)}</label>
                    <input
                        id="strength"
                        type="range"
                        min={SignalStrength::MIN.to_string()}
                        max={SignalStrength::MAX.to_string()}
                        step="1"
                        value={draft.strength.level().to_string()}
                        oninput={on_strength}
                    />

                    <label for="freq">{format!("Frequency: {} GHz", draft.freq)}</label>
                    <input
                        id="freq"
                        type="range"
                        min="0"
                        max="2"
                        step="1"
                        value={draft.freq.slider_index().to_string()}
                        oninput={on_freq}
                    />

                    <div class="modal-actions">
                        <button type="button" class="btn-outline" onclick={on_cancel}>{"Cancel"}</button>
                        <button type="submit" class="btn-primary" disabled={*submitting}>
                            { submit_label(*submitting) }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
