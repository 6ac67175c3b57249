use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

/// Maximum number of entries kept in the rolling status log.
pub const STATUS_LOG_LIMIT: usize = 50;

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
    /// Rolling status log entries, oldest first.
    pub log: Vec<String>,
}

impl StatusBarState {
    /// Default status shown before the first submission.
    pub fn idle() -> Self {
        Self {
            text: "Enter sensor data or choose a CSV file".into(),
            badge_label: style::status_badge_label(StatusTone::Idle).into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
            log: Vec::new(),
        }
    }

    /// Replace the current status and append it to the log.
    pub fn set(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.text = text.into();
        self.badge_label = style::status_badge_label(tone).into();
        self.badge_color = style::status_badge_color(tone);
        self.log.push(self.text.clone());
        if self.log.len() > STATUS_LOG_LIMIT {
            let excess = self.log.len() - STATUS_LOG_LIMIT;
            self.log.drain(..excess);
        }
    }

    /// Concatenate log entries into a single displayable string.
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}
