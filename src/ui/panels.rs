use eframe::egui::{self, RichText, Ui};

use crate::color::SpeciesColors;
use crate::data::filter::SpeciesFilter;
use crate::data::model::{Attribute, Species};
use crate::reactive::input::{BinCount, InputEvent, InputState};
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Right side panel – dashboard controls
// ---------------------------------------------------------------------------

/// Render the sidebar controls. Interactions are queued in `events`; the
/// input state itself is never touched here.
pub fn sidebar(
    ui: &mut Ui,
    inputs: &InputState,
    colors: &SpeciesColors,
    events: &mut Vec<InputEvent>,
) {
    ui.heading("Sidebar");
    ui.separator();

    // ---- Column selector ----
    ui.strong("Select column to visualize");
    let current = inputs.selected_attribute();
    egui::ComboBox::from_id_salt("selected_attribute")
        .selected_text(current.column_name())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for attr in Attribute::ALL {
                if ui
                    .selectable_label(current == attr, attr.column_name())
                    .clicked()
                {
                    events.push(InputEvent::SelectAttribute(attr));
                }
            }
        });
    ui.add_space(8.0);

    // ---- Bin count stepper ----
    ui.strong("Histogram bin count");
    let bins = inputs.bin_count().get();
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(bins > BinCount::MIN, egui::Button::new("−"))
            .clicked()
        {
            events.push(InputEvent::SetBinCount(bins - 1));
        }
        let mut value = bins;
        if ui
            .add(egui::DragValue::new(&mut value).range(BinCount::MIN..=BinCount::MAX))
            .changed()
        {
            events.push(InputEvent::SetBinCount(value));
        }
        if ui
            .add_enabled(bins < BinCount::MAX, egui::Button::new("+"))
            .clicked()
        {
            events.push(InputEvent::SetBinCount(bins + 1));
        }
    });
    ui.add_space(8.0);

    // ---- Species checkboxes (inline) ----
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Select a species");
        if ui.small_button("All").clicked() {
            events.push(InputEvent::SetSpecies(Species::ALL.into_iter().collect()));
        }
        if ui.small_button("None").clicked() {
            events.push(InputEvent::SetSpecies(SpeciesFilter::new()));
        }
    });
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for species in Species::ALL {
            let mut checked = inputs.selected_species().contains(&species);
            let text = RichText::new(species.as_str()).color(colors.color_for(species));
            if ui.checkbox(&mut checked, text).changed() {
                events.push(InputEvent::SetSpeciesSelected(species, checked));
            }
        }
    });

    ui.separator();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Penguins Data");
        ui.separator();
        ui.label(format!(
            "{} penguins loaded, {} visible",
            state.dataset().len(),
            state.filtered.len()
        ));
        ui.separator();
        for (species, n) in state.filtered.species_counts() {
            if n > 0 {
                ui.label(format!("{species}: {n}"));
            }
        }
    });
}
