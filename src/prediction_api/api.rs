//! Client for the hosted structural damage inference service.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use super::multipart::MultipartForm;
use crate::http_client::{self, MAX_BODY_BYTES};

/// Hosted inference service used by the desktop app.
pub const BASE_URL: &str = "https://testing-interface-for-cnn-lstm-2.onrender.com";

const PREDICT_PATH: &str = "predict";
const PREDICT_FILE_PATH: &str = "predict_file";
const MAX_DETAIL_CHARS: usize = 512;
const CSV_CONTENT_TYPE: &str = "text/csv";

/// Trained model the service should run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelSelection {
    #[default]
    #[serde(rename = "LSTM")]
    Lstm,
    #[serde(rename = "CNN")]
    Cnn,
    #[serde(rename = "CNN+LSTM")]
    CnnLstm,
}

impl ModelSelection {
    /// Every selectable model, in menu order.
    pub const ALL: [Self; 3] = [Self::Lstm, Self::Cnn, Self::CnnLstm];

    /// Identifier sent as `model_name`.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Lstm => "LSTM",
            Self::Cnn => "CNN",
            Self::CnnLstm => "CNN+LSTM",
        }
    }
}

impl fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Payload source for a single prediction call.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionInput {
    /// Parsed manual series, sent as JSON.
    Series(Vec<f64>),
    /// CSV file, uploaded as multipart form data.
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PredictionRequest {
    pub model: ModelSelection,
    pub input: PredictionInput,
}

/// Interpreted service reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredictionResponse {
    /// Label to display; `None` when the reply carried no usable prediction.
    pub prediction: Option<String>,
    /// Model the service reports having used, if any.
    pub model_used: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Invalid service URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("HTTP {code}: {detail}")]
    Status { code: u16, detail: String },
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Request canceled before it was sent")]
    Canceled,
}

#[derive(Serialize)]
struct PredictSeriesBody<'a> {
    model_name: &'static str,
    input_data: &'a [f64],
}

/// Blocking client bound to one service base URL.
#[derive(Clone, Debug)]
pub struct PredictionClient {
    predict_url: Url,
    predict_file_url: Url,
}

impl PredictionClient {
    /// Client for the hosted service at [`BASE_URL`].
    pub fn hosted() -> Result<Self, PredictError> {
        Self::new(BASE_URL)
    }

    /// Client for an arbitrary base URL; paths are appended to it.
    pub fn new(base: &str) -> Result<Self, PredictError> {
        let invalid = |reason: String| PredictError::InvalidBaseUrl {
            url: base.to_string(),
            reason,
        };
        let mut base_url = Url::parse(base).map_err(|err| invalid(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let join = |path: &str| base_url.join(path).map_err(|err| invalid(err.to_string()));
        Ok(Self {
            predict_url: join(PREDICT_PATH)?,
            predict_file_url: join(PREDICT_FILE_PATH)?,
        })
    }

    pub fn predict_url(&self) -> &str {
        self.predict_url.as_str()
    }

    pub fn predict_file_url(&self) -> &str {
        self.predict_file_url.as_str()
    }

    /// Run one prediction call for `request`; never retries.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictError> {
        match &request.input {
            PredictionInput::Series(series) => self.predict_series(request.model, series),
            PredictionInput::File(path) => self.predict_file(request.model, path),
        }
    }

    /// `POST /predict` with a JSON body. Non-finite values are sent as `null`.
    pub fn predict_series(
        &self,
        model: ModelSelection,
        series: &[f64],
    ) -> Result<PredictionResponse, PredictError> {
        let body = PredictSeriesBody {
            model_name: model.wire_name(),
            input_data: series,
        };
        let response = http_client::agent()
            .post(self.predict_url.as_str())
            .set("Accept", "application/json")
            .send_json(&body);
        handle_response(response)
    }

    /// `POST /predict_file` with `file` and `model_name` multipart fields.
    pub fn predict_file(
        &self,
        model: ModelSelection,
        path: &Path,
    ) -> Result<PredictionResponse, PredictError> {
        let bytes = std::fs::read(path).map_err(|source| PredictError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        let mut form = MultipartForm::new();
        form.file("file", &filename, CSV_CONTENT_TYPE, &bytes);
        form.text("model_name", model.wire_name());
        let content_type = form.content_type();
        let response = http_client::agent()
            .post(self.predict_file_url.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", &content_type)
            .send_bytes(&form.finish());
        handle_response(response)
    }
}

fn handle_response(
    response: Result<ureq::Response, ureq::Error>,
) -> Result<PredictionResponse, PredictError> {
    let response = match response {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = http_client::read_error_body(response, MAX_BODY_BYTES);
            return Err(PredictError::Status {
                code,
                detail: error_detail(&body),
            });
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(PredictError::Transport(err.to_string()));
        }
    };
    let body = http_client::read_body(response, MAX_BODY_BYTES)
        .map_err(|err| PredictError::InvalidResponse(err.to_string()))?;
    parse_prediction_response(&body)
}

/// Interpret a success body.
///
/// Follows how the web form treated `response.data.prediction`: strings are
/// shown as-is, falsy values (missing, `null`, `false`, `0`, `""`) show
/// nothing, and anything else is shown as compact JSON. Bodies that are not a
/// JSON object carry no prediction; a bare `null` body is a failure.
pub(crate) fn parse_prediction_response(body: &str) -> Result<PredictionResponse, PredictError> {
    let trimmed = body.trim();
    let value = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("Prediction response is not JSON ({err}): {}", clip(trimmed));
            return Ok(PredictionResponse::default());
        }
    };
    match value {
        serde_json::Value::Null => Err(PredictError::InvalidResponse(
            "Response body was null".to_string(),
        )),
        serde_json::Value::Object(mut fields) => Ok(PredictionResponse {
            prediction: fields.remove("prediction").and_then(display_label),
            model_used: fields
                .get("model_used")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        }),
        other => {
            tracing::warn!(
                "Prediction response is not an object: {}",
                clip(&other.to_string())
            );
            Ok(PredictionResponse::default())
        }
    }
}

fn display_label(value: serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Pull `detail` out of an error body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    let trimmed = body.trim();
    let detail = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| value.get("detail").cloned())
        .map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .unwrap_or_else(|| trimmed.to_string());
    clip(&detail)
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_DETAIL_CHARS {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_DETAIL_CHARS).collect();
    clipped.push('…');
    clipped
}
