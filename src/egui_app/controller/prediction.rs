use super::*;
use crate::egui_app::state::SubmitPlan;
use crate::prediction_api::{ModelSelection, PredictionInput};
use rfd::FileDialog;
use std::path::{Path, PathBuf};

impl EguiController {
    pub fn select_model(&mut self, model: ModelSelection) {
        self.apply(FormEvent::SelectModel(model));
    }

    /// Replace the manual series text; any chosen file is dropped.
    pub fn edit_manual_text(&mut self, text: String) {
        self.apply(FormEvent::EditManualText(text));
    }

    /// Pick a CSV file with the native dialog.
    pub fn choose_file_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .set_title("Choose sensor CSV")
            .add_filter("CSV", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };
        self.choose_file(path);
    }

    /// Use `path` as the upload; any manual text is dropped.
    pub fn choose_file(&mut self, path: PathBuf) {
        tracing::debug!("Selected input file {}", path.display());
        self.set_status(format!("Selected {}", display_name(&path)), StatusTone::Info);
        self.apply(FormEvent::ChooseFile(path));
    }

    /// Accept the first dropped file that has a filesystem path.
    pub fn accept_dropped_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        if let Some(path) = paths.into_iter().next() {
            self.choose_file(path);
        }
    }

    pub fn clear_file(&mut self) {
        self.apply(FormEvent::ClearFile);
    }

    /// Submit the current input, superseding any prediction still in flight.
    pub fn submit_prediction(&mut self) {
        match self.apply(FormEvent::Submit) {
            FormEffect::Submit(plan) => self.start_prediction(plan),
            FormEffect::MissingInput => {
                tracing::info!("Submit ignored: no input data or file");
                self.set_status("No input to submit", StatusTone::Warning);
            }
            FormEffect::None | FormEffect::Stale(_) => {}
        }
    }

    fn start_prediction(&mut self, plan: SubmitPlan) {
        let (endpoint, description) = match &plan.request.input {
            PredictionInput::Series(series) => (
                self.client.predict_url().to_string(),
                format!("{} values", series.len()),
            ),
            PredictionInput::File(path) => (
                self.client.predict_file_url().to_string(),
                display_name(path),
            ),
        };
        tracing::info!(
            "Submitting prediction #{} ({description}) with model {} to {endpoint}",
            plan.id,
            plan.request.model
        );
        self.set_status(
            format!("Requesting {} prediction…", plan.request.model),
            StatusTone::Busy,
        );
        self.jobs.begin_prediction(self.client.clone(), plan);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
