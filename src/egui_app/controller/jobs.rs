use crate::egui_app::state::{SubmissionId, SubmitPlan};
use crate::prediction_api::{
    PredictError, PredictionClient, PredictionRequest, PredictionResponse,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, Sender},
    },
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    PredictionFinished(PredictionJobResult),
}

#[derive(Debug)]
pub(crate) struct PredictionJob {
    pub(crate) id: SubmissionId,
    pub(crate) request: PredictionRequest,
    pub(crate) cancel: Arc<AtomicBool>,
}

#[derive(Debug)]
pub(crate) struct PredictionJobResult {
    pub(crate) id: SubmissionId,
    pub(crate) result: Result<PredictionResponse, PredictError>,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    prediction_cancel: Option<Arc<AtomicBool>>,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            prediction_cancel: None,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Start the call for `plan`, superseding any previous prediction.
    pub(super) fn begin_prediction(&mut self, client: PredictionClient, plan: SubmitPlan) {
        self.cancel_prediction();
        let cancel = Arc::new(AtomicBool::new(false));
        self.prediction_cancel = Some(cancel.clone());
        let job = PredictionJob {
            id: plan.id,
            request: plan.request,
            cancel,
        };
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = run_prediction(&client, &job);
            let _ = tx.send(JobMessage::PredictionFinished(PredictionJobResult {
                id: job.id,
                result,
            }));
        });
    }

    pub(super) fn prediction_in_progress(&self) -> bool {
        self.prediction_cancel.is_some()
    }

    /// Flag the running prediction as canceled; a call already on the wire
    /// still completes and its result is discarded by id.
    pub(super) fn cancel_prediction(&mut self) {
        if let Some(cancel) = self.prediction_cancel.take() {
            cancel.store(true, Ordering::Relaxed);
        }
    }

    #[cfg(test)]
    pub(super) fn prediction_cancel_flag(&self) -> Option<Arc<AtomicBool>> {
        self.prediction_cancel.clone()
    }

    pub(super) fn clear_prediction(&mut self) {
        self.prediction_cancel = None;
    }
}

fn run_prediction(
    client: &PredictionClient,
    job: &PredictionJob,
) -> Result<PredictionResponse, PredictError> {
    if job.cancel.load(Ordering::Relaxed) {
        return Err(PredictError::Canceled);
    }
    client.predict(&job.request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction_api::{ModelSelection, PredictionInput};

    fn job(cancel: bool) -> PredictionJob {
        PredictionJob {
            id: 7,
            request: PredictionRequest {
                model: ModelSelection::Lstm,
                input: PredictionInput::Series(vec![1.0]),
            },
            cancel: Arc::new(AtomicBool::new(cancel)),
        }
    }

    #[test]
    fn canceled_job_skips_the_network() {
        // Port 9 (discard) is never contacted because the flag is checked first.
        let client = PredictionClient::new("http://127.0.0.1:9").unwrap();
        let result = run_prediction(&client, &job(true));
        assert!(matches!(result, Err(PredictError::Canceled)));
    }

    #[test]
    fn cancel_prediction_flags_previous_job() {
        let mut jobs = ControllerJobs::new();
        let cancel = Arc::new(AtomicBool::new(false));
        jobs.prediction_cancel = Some(cancel.clone());
        assert!(jobs.prediction_in_progress());
        jobs.cancel_prediction();
        assert!(cancel.load(Ordering::Relaxed));
        assert!(!jobs.prediction_in_progress());
    }
}
