/// Muestra un alert nativo; si no hay window solo se loguea
pub fn alert(message: &str) {
    match web_sys::window() {
        Some(window) => {
            if window.alert_with_message(message).is_err() {
                log::warn!("⚠️ alert() falló: {}", message);
            }
        }
        None => log::info!("ℹ️ {}", message),
    }
}
