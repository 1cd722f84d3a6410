use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::analysis::AnalysisKind;
use crate::data::bins::MasteryBin;
use crate::data::model::Tier;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – analysis picker and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.separator();

    let current = state.analysis;
    egui::ComboBox::from_id_salt("analysis")
        .selected_text(current.name())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in AnalysisKind::ALL {
                if ui.selectable_label(current == kind, kind.name()).clicked() {
                    state.set_analysis(kind);
                }
            }
        });
    ui.add_space(8.0);

    ui.heading("Filters");
    ui.separator();

    // Copy what we need so we can mutate state below.
    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };
    let (Some(bounds), Some(inputs)) = (table.mastery_bounds, state.inputs.clone()) else {
        ui.label("The dataset has no matches.");
        return;
    };
    let analysis = state.analysis;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Mastery range ----
            if analysis.uses_mastery_range() {
                ui.strong("Mastery level");
                let (min, max) = bounds;
                let mut lo = inputs.mastery.lo();
                let mut hi = inputs.mastery.hi();
                let lo_changed = ui
                    .add(egui::Slider::new(&mut lo, min..=max).text("from"))
                    .changed();
                let hi_changed = ui
                    .add(egui::Slider::new(&mut hi, min..=max).text("to"))
                    .changed();
                if lo_changed || hi_changed {
                    state.set_mastery_range(lo, hi);
                }
                ui.separator();
            }

            // ---- Tier multi-select ----
            if analysis.uses_tier_set() {
                let header_text = format!("Tiers  ({}/{})", inputs.tiers.len(), Tier::COUNT);
                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt("tiers")
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all_tiers();
                            }
                            if ui.small_button("None").clicked() {
                                state.select_no_tiers();
                            }
                        });

                        for tier in Tier::ALL {
                            let mut checked = inputs.tiers.contains(&tier);
                            let text = RichText::new(tier.as_str()).color(state.colors.color_for(tier));
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_tier(tier);
                            }
                        }
                    });
                ui.separator();
            }

            // ---- Headline single-select ----
            match analysis {
                AnalysisKind::WinRateByMastery => {
                    ui.strong("Headline mastery range");
                    egui::ComboBox::from_id_salt("headline_bin")
                        .selected_text(inputs.headline_bin.label())
                        .show_ui(ui, |ui: &mut Ui| {
                            for bin in MasteryBin::ALL {
                                let levels = table.bins.range(bin);
                                if ui
                                    .selectable_label(inputs.headline_bin == bin, bin.label())
                                    .on_hover_text(format!(
                                        "Levels {} to {}",
                                        levels.start,
                                        levels.end - 1
                                    ))
                                    .clicked()
                                {
                                    state.set_headline_bin(bin);
                                }
                            }
                        });
                }
                AnalysisKind::DurationByTier => {
                    ui.strong("Headline tier");
                    egui::ComboBox::from_id_salt("headline_tier")
                        .selected_text(inputs.headline_tier.as_str())
                        .show_ui(ui, |ui: &mut Ui| {
                            for tier in Tier::ALL {
                                if ui
                                    .selectable_label(inputs.headline_tier == tier, tier.as_str())
                                    .clicked()
                                {
                                    state.set_headline_tier(tier);
                                }
                            }
                        });
                }
                AnalysisKind::WinRateByTierAndMastery => {}
            }

            if table.unknown_tier_rows > 0 {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!(
                        "{} matches with an unknown tier are left out of tier charts.",
                        table.unknown_tier_rows
                    ))
                    .small()
                    .color(Color32::GRAY),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.cache.invalidate();
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(
            state
                .cache
                .path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );

        if let Some(p) = &state.presentation {
            ui.separator();
            ui.label(format!(
                "{} matches loaded, {} selected",
                p.total_rows, p.result.matched_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open ranked match data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open(path);
    }
}
