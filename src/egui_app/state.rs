//! Shared state types for the egui UI.

mod form;
mod status;

pub use form::*;
pub use status::*;

use crate::prediction_api::ModelSelection;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub status: StatusBarState,
    pub form: FormState,
}

impl UiState {
    pub fn new(model: ModelSelection) -> Self {
        Self {
            status: StatusBarState::idle(),
            form: FormState::new(model),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(ModelSelection::default())
    }
}
