// ============================================================================
// AUTH PANEL - Login / registro / panel de usuario
// ============================================================================
// No guarda sesión propia: todo lo que muestra sale de use_session(). Tras
// login o logout el cambio llega por la suscripción del SessionStore.
// ============================================================================

use yew::prelude::*;

use crate::hooks::use_session;
use crate::utils::alert;
use crate::viewmodels::auth_viewmodel::CONFIRMATION_SENT;
use crate::viewmodels::{AuthPanelState, AuthViewModel, LoginForm, SignUpForm, SignUpResult};

#[derive(Clone, Copy, PartialEq)]
enum AuthTab {
    Login,
    SignUp,
}

#[derive(Clone, Copy, PartialEq)]
enum Busy {
    LoggingIn,
    SigningUp,
    LoggingOut,
    Saving,
}

fn input_value(e: &InputEvent) -> Option<String> {
    e.target_dyn_into::<web_sys::HtmlInputElement>().map(|i| i.value())
}

#[function_component(AuthPanel)]
pub fn auth_panel() -> Html {
    let session = use_session();
    let panel = AuthPanelState::from_session(&session.state);

    let dialog_open = use_state(|| false);
    let tab = use_state(|| AuthTab::Login);
    let login_form = use_state(LoginForm::default);
    let signup_form = use_state(SignUpForm::default);
    let busy = use_state(|| None::<Busy>);
    let show_user_panel = use_state(|| false);
    let display_name_input = use_state(String::new);
    let prompt_dismissed = use_state(|| false);

    // Nuevo usuario -> volver a pedir display name si falta
    {
        let prompt_dismissed = prompt_dismissed.clone();
        let user_id = session.state.user_id().map(str::to_string);
        use_effect_with(user_id, move |_| {
            prompt_dismissed.set(false);
            || ()
        });
    }

    let Some(auth) = session.auth.clone() else {
        return html! {};
    };

    let missing_name = matches!(panel, AuthPanelState::MissingDisplayName { .. });

    match panel {
        AuthPanelState::Anonymous => {
            let open_dialog = {
                let dialog_open = dialog_open.clone();
                Callback::from(move |_e: MouseEvent| dialog_open.set(true))
            };
            let close_dialog = {
                let dialog_open = dialog_open.clone();
                Callback::from(move |_e: MouseEvent| dialog_open.set(false))
            };
            let select_tab = |target: AuthTab| {
                let tab = tab.clone();
                Callback::from(move |_e: MouseEvent| tab.set(target))
            };

            let on_login = {
                let auth = auth.clone();
                let form = (*login_form).clone();
                let busy = busy.clone();
                let dialog_open = dialog_open.clone();
                Callback::from(move |e: SubmitEvent| {
                    e.prevent_default();
                    let auth = auth.clone();
                    let form = form.clone();
                    let busy = busy.clone();
                    let dialog_open = dialog_open.clone();
                    busy.set(Some(Busy::LoggingIn));
                    wasm_bindgen_futures::spawn_local(async move {
                        match AuthViewModel::login(auth.as_ref(), &form).await {
                            Ok(()) => dialog_open.set(false),
                            Err(err) => alert(&err.user_message()),
                        }
                        busy.set(None);
                    });
                })
            };

            let on_signup = {
                let auth = auth.clone();
                let form = (*signup_form).clone();
                let busy = busy.clone();
                let dialog_open = dialog_open.clone();
                Callback::from(move |e: SubmitEvent| {
                    e.prevent_default();
                    let auth = auth.clone();
                    let form = form.clone();
                    let busy = busy.clone();
                    let dialog_open = dialog_open.clone();
                    busy.set(Some(Busy::SigningUp));
                    wasm_bindgen_futures::spawn_local(async move {
                        match AuthViewModel::sign_up(auth.as_ref(), &form).await {
                            Ok(SignUpResult::ConfirmationSent) => {
                                alert(CONFIRMATION_SENT);
                                dialog_open.set(false);
                            }
                            Ok(SignUpResult::SignedIn) => dialog_open.set(false),
                            Err(err) => alert(&err.user_message()),
                        }
                        busy.set(None);
                    });
                })
            };

            let on_login_email = {
                let form = login_form.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(v) = input_value(&e) {
                        form.set(LoginForm { email: v, ..(*form).clone() });
                    }
                })
            };
            let on_login_password = {
                let form = login_form.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(v) = input_value(&e) {
                        form.set(LoginForm { password: v, ..(*form).clone() });
                    }
                })
            };
            let on_signup_name = {
                let form = signup_form.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(v) = input_value(&e) {
                        form.set(SignUpForm { display_name: v, ..(*form).clone() });
                    }
                })
            };
            let on_signup_email = {
                let form = signup_form.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(v) = input_value(&e) {
                        form.set(SignUpForm { email: v, ..(*form).clone() });
                    }
                })
            };
            let on_signup_password = {
                let form = signup_form.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(v) = input_value(&e) {
                        form.set(SignUpForm { password: v, ..(*form).clone() });
                    }
                })
            };

            let stop = Callback::from(|e: MouseEvent| e.stop_propagation());
            let tab_class = |t: AuthTab| if *tab == t { "tab active" } else { "tab" };
            let is_busy = busy.is_some();

            html! {
                <>
                    <button class="btn-primary" onclick={open_dialog}>{"Login"}</button>
                    if *dialog_open {
                        <div class="modal-backdrop" onclick={close_dialog}>
                            <div class="modal" onclick={stop}>
                                <h2 class="modal-title">{"Welcome to Obrix WiFi Mapper"}</h2>
                                <p class="modal-description">
                                    {"Log in or create an account to contribute new WiFi spots."}
                                </p>
                                <div class="tabs">
                                    <button class={tab_class(AuthTab::Login)} onclick={select_tab(AuthTab::Login)}>{"Login"}</button>
                                    <button class={tab_class(AuthTab::SignUp)} onclick={select_tab(AuthTab::SignUp)}>{"Sign Up"}</button>
                                </div>
                                if *tab == AuthTab::Login {
                                    <form class="auth-form" onsubmit={on_login}>
                                        <label for="login-email">{"Email"}</label>
                                        <input id="login-email" type="email" placeholder="you@example.com"
                                            value={login_form.email.clone()} oninput={on_login_email} required=true />
                                        <label for="login-password">{"Password"}</label>
                                        <input id="login-password" type="password"
                                            value={login_form.password.clone()} oninput={on_login_password} required=true />
                                        <button type="submit" class="btn-primary" disabled={is_busy}>
                                            { if *busy == Some(Busy::LoggingIn) { "Logging in..." } else { "Log In" } }
                                        </button>
                                    </form>
                                } else {
                                    <form class="auth-form" onsubmit={on_signup}>
                                        <label for="signup-display-name">{"Display Name"}</label>
                                        <input id="signup-display-name" type="text" placeholder="Your name"
                                            value={signup_form.display_name.clone()} oninput={on_signup_name} required=true />
                                        <label for="signup-email">{"Email"}</label>
                                        <input id="signup-email" type="email" placeholder="you@example.com"
                                            value={signup_form.email.clone()} oninput={on_signup_email} required=true />
                                        <label for="signup-password">{"Password"}</label>
                                        <input id="signup-password" type="password"
                                            value={signup_form.password.clone()} oninput={on_signup_password} required=true />
                                        <button type="submit" class="btn-primary" disabled={is_busy}>
                                            { if *busy == Some(Busy::SigningUp) { "Signing up..." } else { "Sign Up" } }
                                        </button>
                                    </form>
                                }
                            </div>
                        </div>
                    }
                </>
            }
        }

        AuthPanelState::Complete { email, initial } | AuthPanelState::MissingDisplayName { email, initial } => {
            let needs_name = missing_name && !*prompt_dismissed;

            let on_logout = {
                let auth = auth.clone();
                let busy = busy.clone();
                let show_user_panel = show_user_panel.clone();
                Callback::from(move |_e: MouseEvent| {
                    let auth = auth.clone();
                    let busy = busy.clone();
                    let show_user_panel = show_user_panel.clone();
                    busy.set(Some(Busy::LoggingOut));
                    wasm_bindgen_futures::spawn_local(async move {
                        match AuthViewModel::logout(auth.as_ref()).await {
                            Ok(()) => show_user_panel.set(false),
                            Err(err) => alert(&err.user_message()),
                        }
                        busy.set(None);
                    });
                })
            };

            let on_save_name = {
                let auth = auth.clone();
                let busy = busy.clone();
                let value = (*display_name_input).clone();
                let prompt_dismissed = prompt_dismissed.clone();
                Callback::from(move |e: SubmitEvent| {
                    e.prevent_default();
                    let auth = auth.clone();
                    let busy = busy.clone();
                    let value = value.clone();
                    let prompt_dismissed = prompt_dismissed.clone();
                    busy.set(Some(Busy::Saving));
                    wasm_bindgen_futures::spawn_local(async move {
                        match AuthViewModel::save_display_name(auth.as_ref(), &value).await {
                            Ok(_) => prompt_dismissed.set(true),
                            Err(err) => alert(&err.user_message()),
                        }
                        busy.set(None);
                    });
                })
            };

            let on_name_input = {
                let display_name_input = display_name_input.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(v) = input_value(&e) {
                        display_name_input.set(v);
                    }
                })
            };
            let dismiss_prompt = {
                let prompt_dismissed = prompt_dismissed.clone();
                Callback::from(move |_e: MouseEvent| prompt_dismissed.set(true))
            };
            let open_user_panel = {
                let show = show_user_panel.clone();
                Callback::from(move |_e: MouseEvent| show.set(true))
            };
            let close_user_panel = {
                let show = show_user_panel.clone();
                Callback::from(move |_e: MouseEvent| show.set(false))
            };
            let stop = Callback::from(|e: MouseEvent| e.stop_propagation());
            let is_busy = busy.is_some();

            html! {
                <div class="user-area">
                    if needs_name {
                        <div class="modal-backdrop" onclick={dismiss_prompt}>
                            <div class="modal" onclick={stop}>
                                <h2 class="modal-title">{"Set your display name"}</h2>
                                <p class="modal-description">
                                    {"Add a display name to personalize your contributions."}
                                </p>
                                <form class="auth-form" onsubmit={on_save_name}>
                                    <label for="display-name">{"Display name"}</label>
                                    <input id="display-name" type="text"
                                        value={(*display_name_input).clone()} oninput={on_name_input} required=true />
                                    <button type="submit" class="btn-primary" disabled={is_busy}>
                                        { if *busy == Some(Busy::Saving) { "Saving..." } else { "Save" } }
                                    </button>
                                </form>
                            </div>
                        </div>
                    }
                    if *show_user_panel {
                        <div class="user-panel">
                            <p class="user-email">{email}</p>
                            <button class="btn-primary" onclick={on_logout} disabled={is_busy}>
                                { if *busy == Some(Busy::LoggingOut) { "Logging out..." } else { "Log Out" } }
                            </button>
                            <button class="btn-outline" onclick={close_user_panel}>{"Close"}</button>
                        </div>
                    } else {
                        <button class="avatar" aria-label="Account" onclick={open_user_panel}>{initial}</button>
                    }
                </div>
            }
        }
    }
}
