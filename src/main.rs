use wifi_mapper::config::CONFIG;
use wifi_mapper::App;

fn main() {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 WiFi Mapper starting...");

    yew::Renderer::<App>::new().render();
}
