#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use drawing_app::{CanvasConfig, PaintApp, config::CONFIG_ENV_VAR};

fn load_config() -> CanvasConfig {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => CanvasConfig::load(&path).unwrap_or_else(|err| {
            log::error!("Ignoring config {:?}: {}", path, err);
            CanvasConfig::default()
        }),
        None => CanvasConfig::default(),
    }
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Drawing App")
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Drawing App",
        native_options,
        Box::new(|cc| Ok(Box::new(PaintApp::new(cc, config)?))),
    )
}
