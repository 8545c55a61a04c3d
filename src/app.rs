use eframe::egui::{self, ScrollArea};

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashboardApp {
    pub state: AppState,
}

impl LaunchDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: dropdown, pie, payload slider, scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::site_dropdown(ui, &mut self.state);
                    ui.add_space(8.0);

                    let state = &self.state;
                    charts::pie_chart(ui, state.dashboard.pie_chart(), &state.site_colors);
                    ui.add_space(8.0);

                    panels::payload_controls(ui, &mut self.state);
                    ui.add_space(8.0);

                    let state = &self.state;
                    charts::scatter_chart(
                        ui,
                        state.dashboard.scatter_chart(),
                        &state.booster_colors,
                        &state.config.payload_slider,
                    );
                });
        });
    }
}
