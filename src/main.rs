//! Isolation AI Engine GUI
//!
//! A graphical interface for playing Isolation against the AI or another player.

use isolation::config::load_config;
use isolation::ui::IsolationApp;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config();
    tracing::info!(
        width = config.board_width,
        height = config.board_height,
        heuristic = config.heuristic.name(),
        time_limit_ms = config.time_limit_ms,
        "starting"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Isolation"),
        ..Default::default()
    };

    eframe::run_native(
        "Isolation",
        options,
        Box::new(move |cc| Ok(Box::new(IsolationApp::new(cc, config)))),
    )
}
