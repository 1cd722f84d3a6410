mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::RankedDashboardApp;
use clap::Parser;
use config::DashboardArgs;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let args = DashboardArgs::parse();
    log::info!(
        "Starting with {} ({})",
        args.data.display(),
        args.analysis
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(args.window_size())
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(args.data, args.analysis);

    eframe::run_native(
        "Ranked Dashboard – Win Rate & Match Duration",
        options,
        Box::new(move |_cc| Ok(Box::new(RankedDashboardApp::new(state)))),
    )
}
