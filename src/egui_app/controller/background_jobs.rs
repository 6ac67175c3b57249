use super::jobs::{JobMessage, PredictionJobResult};
use super::*;
use crate::egui_app::state::SubmissionOutcome;
use crate::prediction_api::PredictError;

impl EguiController {
    pub(in crate::egui_app::controller) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::PredictionFinished(message) => self.apply_prediction_result(message),
            }
        }
    }

    fn apply_prediction_result(&mut self, message: PredictionJobResult) {
        let PredictionJobResult { id, result } = message;
        if self.ui.form.active_submission() != Some(id) {
            match result {
                Err(PredictError::Canceled) => {
                    tracing::debug!("Prediction #{id} canceled before sending")
                }
                _ => tracing::debug!("Discarding result of superseded prediction #{id}"),
            }
            return;
        }
        self.jobs.clear_prediction();

        let outcome = match result {
            Ok(response) => {
                if let Some(model) = response.model_used.as_deref() {
                    tracing::debug!("Prediction #{id} served by model {model}");
                }
                match response.prediction.as_deref() {
                    Some(label) => {
                        tracing::info!("Prediction #{id}: {label}");
                        self.set_status(format!("Prediction: {label}"), StatusTone::Info);
                    }
                    None => {
                        tracing::warn!("Prediction #{id} response had no prediction value");
                        self.set_status("Service returned no prediction", StatusTone::Warning);
                    }
                }
                SubmissionOutcome::Success(response.prediction)
            }
            Err(err) => {
                tracing::error!("Error making prediction #{id}: {err}");
                self.set_status("Prediction failed; see log for details", StatusTone::Error);
                SubmissionOutcome::Failure
            }
        };
        self.apply(FormEvent::Completed { id, outcome });
    }
}
