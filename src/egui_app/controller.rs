//! Bridges form state, the prediction service and the egui renderer.

mod background_jobs;
pub(crate) mod jobs;
mod prediction;

#[cfg(test)]
mod test_support;

use crate::config::AppSettings;
use crate::egui_app::state::{FormEffect, FormEvent, UiState};
use crate::egui_app::ui::style::StatusTone;
use crate::prediction_api::PredictionClient;

use jobs::ControllerJobs;

/// Maintains app state and bridges core logic to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    client: PredictionClient,
    jobs: ControllerJobs,
}

impl EguiController {
    pub fn new(client: PredictionClient, settings: &AppSettings) -> Self {
        Self {
            ui: UiState::new(settings.default_model),
            client,
            jobs: ControllerJobs::new(),
        }
    }

    /// Drain finished background work; call once per frame.
    pub fn tick(&mut self) {
        self.poll_background_jobs();
    }

    /// True while the latest submission is awaiting its response.
    pub fn is_submitting(&self) -> bool {
        self.ui.form.in_flight
    }

    pub fn dismiss_prompt(&mut self) {
        self.apply(FormEvent::DismissPrompt);
    }

    fn apply(&mut self, event: FormEvent) -> FormEffect {
        self.ui.form.apply(event)
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }
}

impl Drop for EguiController {
    fn drop(&mut self) {
        self.jobs.cancel_prediction();
    }
}
