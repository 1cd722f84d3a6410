use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RankedDashboardApp {
    pub state: AppState,
}

impl RankedDashboardApp {
    /// Build the app and load the initial dataset.
    pub fn new(mut state: AppState) -> Self {
        state.reload();
        Self { state }
    }
}

impl eframe::App for RankedDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pick up edits to the source file, also while the window is idle.
        self.state.poll_source();
        ctx.request_repaint_after(self.state.next_poll_in());

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: analysis + filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: headline, chart, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::analysis_view(ui, &self.state);
        });
    }
}
