mod app;
mod binding;
mod color;
mod config;
mod data;
mod error;
mod state;
mod summary;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use app::LaunchDashboardApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load(Path::new(CONFIG_FILE)).context("loading dashboard config")?;

    // The only read of the data file; the dataset is shared read-only from here on.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading launch records from {}", config.data_path.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;
    let dataset = Arc::new(dataset);

    let title = config.title.clone();
    let state = AppState::new(config, dataset).context("initialising dashboard state")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI runtime failed: {e}"))
}
