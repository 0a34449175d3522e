//! SuperBar demo entry point (native).

mod app;

use app::DemoApp;

fn main() -> eframe::Result {
    env_logger::init();
    log::info!("Starting SuperBar demo");

    let config = match std::env::args().nth(1) {
        Some(path) => app::load_config(&path).unwrap_or_else(|e| {
            log::error!("Failed to load config, using defaults: {}", e);
            Default::default()
        }),
        None => Default::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SuperBar")
            .with_inner_size([420.0, 220.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SuperBar",
        options,
        Box::new(move |_cc| Ok(Box::new(DemoApp::new(config)))),
    )
}
