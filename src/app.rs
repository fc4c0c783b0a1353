use eframe::egui;

use crate::color::SpeciesColors;
use crate::state::DashboardState;
use crate::ui::{cards, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinsApp {
    pub state: DashboardState,
    colors: SpeciesColors,
}

impl PenguinsApp {
    pub fn new(state: DashboardState) -> Self {
        Self {
            state,
            colors: SpeciesColors::default(),
        }
    }
}

impl eframe::App for PenguinsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Right side panel: controls ----
        egui::SidePanel::right("sidebar")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::sidebar(ui, self.state.inputs(), &self.colors, &mut events);
            });

        // ---- Central panel: cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            cards::dashboard(ui, &mut self.state, &self.colors);
        });

        // Recompute between frames so every card reads one consistent state.
        if !self.state.dispatch_all(events).is_empty() {
            ctx.request_repaint();
        }
    }
}
