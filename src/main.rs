mod app;
mod color;
mod config;
mod data;
mod reactive;
mod render;
mod state;
mod ui;

use anyhow::Result;
use app::PenguinsApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use state::DashboardState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    let dataset = config.load_dataset().inspect_err(|e| {
        log::error!("Failed to load dataset: {e:#}");
    })?;
    let state = DashboardState::new(dataset, config.page_size)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Penguins Data",
        options,
        Box::new(|_cc| Ok(Box::new(PenguinsApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
