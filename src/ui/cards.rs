use eframe::egui::{self, Ui};

use crate::color::SpeciesColors;
use crate::state::DashboardState;
use crate::ui::{plot, tables};

// ---------------------------------------------------------------------------
// Main area – two rows of two cards
// ---------------------------------------------------------------------------

/// Lay out the four cards:
///
/// ```text
///  ┌───────────┬──────────────┐
///  │ Histogram │  Data Table  │
///  ├───────────┼──────────────┤
///  │ Scatter   │  Summary     │
///  └───────────┴──────────────┘
/// ```
pub fn dashboard(ui: &mut Ui, state: &mut DashboardState, colors: &SpeciesColors) {
    let spacing = ui.spacing().item_spacing.y;
    let row_height = ((ui.available_height() - spacing) / 2.0).max(120.0);
    let width = ui.available_width();

    ui.allocate_ui(egui::vec2(width, row_height), |ui: &mut Ui| {
        ui.columns(2, |cols: &mut [Ui]| {
            card(&mut cols[0], "Histogram", |ui| {
                plot::histogram(ui, &state.histogram, colors);
            });
            card(&mut cols[1], "Data Table", |ui| {
                tables::data_table(ui, &mut state.table);
            });
        });
    });

    ui.allocate_ui(egui::vec2(width, row_height), |ui: &mut Ui| {
        ui.columns(2, |cols: &mut [Ui]| {
            card(&mut cols[0], "Scatterplot: Species", |ui| {
                plot::scatterplot(ui, &state.scatter, colors);
            });
            card(&mut cols[1], "Summary Statistics", |ui| {
                tables::summary_table(ui, &state.summary);
            });
        });
    });
}

/// A framed card with a header line.
fn card(ui: &mut Ui, header: &str, body: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_size(ui.available_size());
        ui.strong(header);
        ui.separator();
        body(ui);
    });
}
