use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::analysis::{ChartKind, HeadlineView, Presentation};
use crate::color::{blues, TierColors};
use crate::data::aggregate::{GroupKey, Metric};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel: headline, chart, summary table
// ---------------------------------------------------------------------------

/// Render the active analysis in the central panel.
pub fn analysis_view(ui: &mut Ui, state: &AppState) {
    let presentation = match &state.presentation {
        Some(p) => p,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a match dataset to start  (File → Open…)");
            });
            return;
        }
    };

    ui.heading(&presentation.title);
    if let Some(h) = &presentation.headline {
        headline_card(ui, h);
    }
    ui.separator();

    if presentation.result.is_empty() {
        ui.label(RichText::new("No matches for the current selection.").italics());
        return;
    }

    let chart_height = (ui.available_height() * 0.65).max(200.0);
    match presentation.chart {
        ChartKind::Line => line_chart(ui, presentation, chart_height),
        ChartKind::Bar => bar_chart(ui, presentation, &state.colors, chart_height),
    }

    ui.separator();
    summary_table(ui, presentation);
}

fn format_value(metric: Metric, value: f64) -> String {
    format!("{value:.1}{}", metric.unit())
}

fn headline_card(ui: &mut Ui, h: &HeadlineView) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(&h.label);
        match h.value.value() {
            Some(value) => {
                ui.label(RichText::new(format_value(h.metric, value)).strong().size(20.0));
                ui.label(format!("({} matches)", h.value.count()));
            }
            None => {
                ui.label(RichText::new("no data").italics().color(Color32::GRAY));
            }
        }
    });
}

// -- Line chart: one point per mastery level --

fn line_chart(ui: &mut Ui, p: &Presentation, height: f32) {
    let points: Vec<[f64; 2]> = p
        .result
        .groups
        .iter()
        .filter_map(|g| match g.key {
            GroupKey::Level(level) => Some([f64::from(level), g.value]),
            _ => None,
        })
        .collect();

    Plot::new("analysis_line")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(p.x_label)
        .y_axis_label(p.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(points.clone()))
                .name(p.y_label)
                .color(Color32::LIGHT_BLUE)
                .width(1.5);
            plot_ui.line(line);
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(3.0)
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

// -- Bar chart: one bar per group, x axis labelled with the group keys --

fn bar_chart(ui: &mut Ui, p: &Presentation, colors: &TierColors, height: f32) {
    let groups = &p.result.groups;
    let (min, max) = groups
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), g| {
            (lo.min(g.value), hi.max(g.value))
        });
    let span = max - min;

    let bars: Vec<Bar> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let fill = match (p.result.metric, g.key) {
                // Duration bars are shaded by value, like a continuous colour scale.
                (Metric::MeanDuration, _) => {
                    blues(if span > f64::EPSILON { (g.value - min) / span } else { 1.0 })
                }
                (_, GroupKey::Tier(t)) => colors.color_for(t),
                _ => Color32::LIGHT_BLUE,
            };
            Bar::new(i as f64, g.value)
                .name(g.key.to_string())
                .fill(fill)
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = p.result.keys().iter().map(ToString::to_string).collect();
    let metric = p.result.metric;

    let chart = BarChart::new(bars)
        .name(p.y_label)
        .element_formatter(Box::new(move |bar, _chart| format_value(metric, bar.value)));

    Plot::new("analysis_bars")
        .height(height)
        .x_axis_label(p.x_label)
        .y_axis_label(p.y_label)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// -- Group table under the chart (the coarser breakdown when there is one) --

fn summary_table(ui: &mut Ui, p: &Presentation) {
    let summary = p.breakdown.as_ref().unwrap_or(&p.result);

    ui.label(format!(
        "{} of {} matches selected",
        p.result.matched_rows, p.total_rows
    ));

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong(summary.group_by.label());
            });
            header.col(|ui: &mut Ui| {
                ui.strong(p.y_label);
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Matches");
            });
        })
        .body(|mut body| {
            for g in &summary.groups {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(g.key.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_value(summary.metric, g.value));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(g.count.to_string());
                    });
                });
            }
        });

    ui.add_space(4.0);
    ui.label(
        RichText::new("Groups with no matches are not shown.")
            .small()
            .color(Color32::GRAY),
    );
}
