use std::path::PathBuf;

use crate::prediction_api::{ModelSelection, PredictionInput, PredictionRequest, parse_series};

/// Prompt shown when submit is pressed with no input at all.
pub const MISSING_INPUT_PROMPT: &str = "Please enter input data or upload a file!";
/// Label shown in place of a prediction when the call fails.
pub const ERROR_MARKER: &str = "Error in prediction";
/// The one label that renders with the damaged colour.
pub const DAMAGED_LABEL: &str = "Damaged";
/// Submit button text while idle.
pub const SUBMIT_LABEL_IDLE: &str = "Get Prediction";
/// Submit button text while a request is in flight.
pub const SUBMIT_LABEL_BUSY: &str = "Loading...";

/// Identifier handed to each submission that reaches the network.
pub type SubmissionId = u64;

/// Outcome of the latest completed submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PredictionResult {
    /// Label returned by the service.
    Label(String),
    /// The call failed; details only go to the log.
    Error,
}

impl PredictionResult {
    /// Text displayed after the `Prediction:` prefix.
    pub fn label(&self) -> &str {
        match self {
            Self::Label(label) => label,
            Self::Error => ERROR_MARKER,
        }
    }

    /// Exact, case-sensitive match against [`DAMAGED_LABEL`].
    pub fn is_damaged(&self) -> bool {
        self.label() == DAMAGED_LABEL
    }

    /// Full panel text.
    pub fn display_text(&self) -> String {
        format!("Prediction: {}", self.label())
    }
}

/// How a submission ended, as seen by the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The service answered; `None` when it carried no usable label.
    Success(Option<String>),
    /// Transport error, non-2xx status, unreadable file or bad body.
    Failure,
}

/// Every mutation the form accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum FormEvent {
    SelectModel(ModelSelection),
    /// Replaces the manual text and drops any chosen file.
    EditManualText(String),
    /// Chooses a file and drops any manual text.
    ChooseFile(PathBuf),
    ClearFile,
    Submit,
    Completed {
        id: SubmissionId,
        outcome: SubmissionOutcome,
    },
    DismissPrompt,
}

/// Request the caller must send on behalf of a submission.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitPlan {
    pub id: SubmissionId,
    pub request: PredictionRequest,
}

/// Side effect produced by [`FormState::apply`].
#[derive(Clone, Debug, PartialEq)]
pub enum FormEffect {
    None,
    /// Send exactly one request for this plan.
    Submit(SubmitPlan),
    /// Submit was pressed with nothing to send; the prompt is now open.
    MissingInput,
    /// A completion arrived for a submission that is no longer current.
    Stale(SubmissionId),
}

/// Transient form state; nothing here survives a restart.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub model: ModelSelection,
    pub manual_text: String,
    pub file: Option<PathBuf>,
    /// Latest result; `None` hides the result panel.
    pub result: Option<PredictionResult>,
    pub in_flight: bool,
    /// Open modal prompt text.
    pub prompt: Option<String>,
    active_submission: Option<SubmissionId>,
    next_submission: SubmissionId,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(ModelSelection::default())
    }
}

impl FormState {
    pub fn new(model: ModelSelection) -> Self {
        Self {
            model,
            manual_text: String::new(),
            file: None,
            result: None,
            in_flight: false,
            prompt: None,
            active_submission: None,
            next_submission: 1,
        }
    }

    /// Apply one event and report what the caller has to do next.
    pub fn apply(&mut self, event: FormEvent) -> FormEffect {
        match event {
            FormEvent::SelectModel(model) => {
                self.model = model;
                FormEffect::None
            }
            FormEvent::EditManualText(text) => {
                self.manual_text = text;
                self.file = None;
                FormEffect::None
            }
            FormEvent::ChooseFile(path) => {
                self.file = Some(path);
                self.manual_text.clear();
                FormEffect::None
            }
            FormEvent::ClearFile => {
                self.file = None;
                FormEffect::None
            }
            FormEvent::Submit => self.submit(),
            FormEvent::Completed { id, outcome } => self.complete(id, outcome),
            FormEvent::DismissPrompt => {
                self.prompt = None;
                FormEffect::None
            }
        }
    }

    /// Submission whose result is still awaited, if any.
    pub fn active_submission(&self) -> Option<SubmissionId> {
        self.active_submission
    }

    pub fn submit_label(&self) -> &'static str {
        if self.in_flight {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        }
    }

    fn submit(&mut self) -> FormEffect {
        let input = if let Some(path) = &self.file {
            PredictionInput::File(path.clone())
        } else if !self.manual_text.is_empty() {
            PredictionInput::Series(parse_series(&self.manual_text))
        } else {
            self.prompt = Some(MISSING_INPUT_PROMPT.to_string());
            return FormEffect::MissingInput;
        };
        let id = self.next_submission;
        self.next_submission = self.next_submission.wrapping_add(1).max(1);
        self.active_submission = Some(id);
        self.in_flight = true;
        self.result = None;
        FormEffect::Submit(SubmitPlan {
            id,
            request: PredictionRequest {
                model: self.model,
                input,
            },
        })
    }

    fn complete(&mut self, id: SubmissionId, outcome: SubmissionOutcome) -> FormEffect {
        if self.active_submission != Some(id) {
            return FormEffect::Stale(id);
        }
        self.active_submission = None;
        self.in_flight = false;
        self.result = match outcome {
            SubmissionOutcome::Success(label) => label.map(PredictionResult::Label),
            SubmissionOutcome::Failure => Some(PredictionResult::Error),
        };
        FormEffect::None
    }
}
