//! egui renderer for the prediction form.

mod form_panel;
mod missing_input_prompt;
mod result_panel;
mod status_bar;
pub mod style;

use std::path::PathBuf;
use std::time::Duration;

use crate::config::AppSettings;
use crate::egui_app::controller::EguiController;
use crate::prediction_api::PredictionClient;
use eframe::egui;

/// Smallest window size that keeps the form readable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(420.0, 520.0);

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app against the hosted prediction service.
    pub fn new(settings: &AppSettings) -> Result<Self, String> {
        let client = PredictionClient::hosted()
            .map_err(|err| format!("Failed to configure prediction service: {err}"))?;
        Ok(Self::with_controller(EguiController::new(client, settings)))
    }

    pub fn with_controller(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn take_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.controller.accept_dropped_files(dropped);
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        let prompt_open = self.controller.ui.form.prompt.is_some();
        if !prompt_open {
            self.take_dropped_files(ctx);
        }
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!prompt_open, |ui| {
                self.render_form(ui);
                ui.add_space(16.0);
                self.render_result(ui);
            });
        });
        self.render_missing_input_prompt(ctx);
        if self.controller.is_submitting() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}
