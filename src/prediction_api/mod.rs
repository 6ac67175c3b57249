//! Request/response contract with the remote damage classification service.

mod multipart;
mod series;

pub mod api;

pub use api::{
    ModelSelection, PredictError, PredictionClient, PredictionInput, PredictionRequest,
    PredictionResponse,
};
pub use series::{coerce_number, parse_series};
