use yew::prelude::*;

use crate::hooks::MapSettingsAction;
use crate::maps::{Basemap, ColorProfileId, HexColor, MapSettings};
use crate::utils::prefers_dark_scheme;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsPopupProps {
    pub settings: MapSettings,
    pub on_action: Callback<MapSettingsAction>,
}

/// Menú de ajustes del mapa (rueda abajo a la derecha)
#[function_component(SettingsPopup)]
pub fn settings_popup(props: &SettingsPopupProps) -> Html {
    let open = use_state(|| false);
    let basemap_section_open = use_state(|| true);
    let colors_section_open = use_state(|| true);

    let toggle_menu = {
        let open = open.clone();
        Callback::from(move |_e: MouseEvent| open.set(!*open))
    };
    let toggle_basemaps = {
        let section = basemap_section_open.clone();
        Callback::from(move |_e: MouseEvent| section.set(!*section))
    };
    let toggle_colors = {
        let section = colors_section_open.clone();
        Callback::from(move |_e: MouseEvent| section.set(!*section))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    let settings = &props.settings;

    let use_system_default = {
        let cb = props.on_action.clone();
        Callback::from(move |_e: MouseEvent| {
            cb.emit(MapSettingsAction::UseSystemDefault {
                prefers_dark: prefers_dark_scheme(),
            })
        })
    };

    let basemap_options = Basemap::ALL.iter().map(|basemap| {
        let basemap = *basemap;
        let cb = props.on_action.clone();
        let onchange = Callback::from(move |_e: Event| cb.emit(MapSettingsAction::SelectBasemap(basemap)));
        html! {
            <label class="settings-option" key={basemap.key()}>
                <input type="radio" name="basemap" checked={settings.basemap == basemap} onchange={onchange} />
                <span>{basemap.name()}</span>
            </label>
        }
    });

    let profile_options = ColorProfileId::ALL.iter().map(|profile| {
        let profile = *profile;
        let cb = props.on_action.clone();
        let onchange = Callback::from(move |_e: Event| cb.emit(MapSettingsAction::SelectProfile(profile)));
        let palette = settings.palette_for(profile);
        let swatches: Html = palette
            .levels()
            .map(|(level, color)| {
                html! {
                    <span class="profile-swatch" key={level.level().to_string()} style={format!("background:{};", color)}></span>
                }
            })
            .collect();
        html! {
            <label class="settings-option" key={profile.key()}>
                <input
                    type="radio"
                    name="color-profile"
                    checked={settings.profile == profile}
                    onchange={onchange}
                />
                <span class="profile-name">{profile.name()}</span>
                <span class="profile-swatches">{ swatches }</span>
            </label>
        }
    });

    let custom_editor = if settings.profile == ColorProfileId::Custom {
        let inputs = settings.custom_palette.levels().map(|(level, color)| {
            let cb = props.on_action.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() else {
                    return;
                };
                match HexColor::parse(&input.value()) {
                    Some(color) => cb.emit(MapSettingsAction::SetCustomColor(level, color)),
                    None => log::warn!("⚠️ Color inválido: {}", input.value()),
                }
            });
            html! {
                <label class="color-level" key={level.level().to_string()}>
                    <span>{format!("Strength {}", level)}</span>
                    <input type="color" value={color.to_string()} oninput={oninput} />
                </label>
            }
        });
        html! { <div class="custom-colors">{ for inputs }</div> }
    } else {
        html! {}
    };

    let arrow = |open: bool| if open { "▾" } else { "▸" };

    html! {
        <div class="map-settings">
            <button class="btn-settings-cog" aria-label="Map settings" onclick={toggle_menu}>{"⚙"}</button>
            if *open {
                <div class="settings-popup active" onclick={stop}>
                    <div class="settings-header">{"Map Settings"}</div>
                    <div class="settings-section">
                        <button class="collapsible-trigger" onclick={toggle_basemaps}>
                            {format!("Map Style {}", arrow(*basemap_section_open))}
                        </button>
                        if *basemap_section_open {
                            <div class="collapsible-content">
                                { for basemap_options }
                                if settings.basemap_overridden {
                                    <button class="btn-system-default" onclick={use_system_default}>
                                        {"Use system default"}
                                    </button>
                                } else {
                                    <div class="settings-hint">
                                        {"Using system default ("}<em>{"auto"}</em>{"). Select to override."}
                                    </div>
                                }
                            </div>
                        }
                    </div>
                    <div class="settings-section">
                        <button class="collapsible-trigger" onclick={toggle_colors}>
                            {format!("Color Profile {}", arrow(*colors_section_open))}
                        </button>
                        if *colors_section_open {
                            <div class="collapsible-content">
                                { for profile_options }
                                { custom_editor }
                            </div>
                        }
                    </div>
                </div>
            }
        </div>
    }
}
