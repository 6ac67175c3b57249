use super::EguiApp;
use super::style;
use crate::prediction_api::ModelSelection;
use eframe::egui::{self, RichText, Ui};

const FORM_LABEL_GAP: f32 = 4.0;
const FORM_SECTION_GAP: f32 = 12.0;

impl EguiApp {
    /// Model picker, manual series, file chooser and the submit button.
    pub(super) fn render_form(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Structural Damage Prediction");
        });
        ui.add_space(FORM_SECTION_GAP);

        self.render_model_picker(ui);
        ui.add_space(FORM_SECTION_GAP);
        self.render_manual_input(ui);
        ui.add_space(FORM_SECTION_GAP);
        self.render_file_input(ui);
        ui.add_space(FORM_SECTION_GAP);
        self.render_submit_button(ui);
    }

    fn render_model_picker(&mut self, ui: &mut Ui) {
        ui.label("Choose a Model:");
        ui.add_space(FORM_LABEL_GAP);
        let mut model = self.controller.ui.form.model;
        egui::ComboBox::from_id_salt("model_select")
            .selected_text(model.to_string())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for option in ModelSelection::ALL {
                    ui.selectable_value(&mut model, option, option.to_string());
                }
            });
        if model != self.controller.ui.form.model {
            self.controller.select_model(model);
        }
    }

    fn render_manual_input(&mut self, ui: &mut Ui) {
        ui.label("Enter Sensor Data (comma-separated):");
        ui.add_space(FORM_LABEL_GAP);
        let mut text = self.controller.ui.form.manual_text.clone();
        let response = ui.add(
            egui::TextEdit::multiline(&mut text)
                .hint_text("e.g. 1,2,3,4,5,6...")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.controller.edit_manual_text(text);
        }
    }

    fn render_file_input(&mut self, ui: &mut Ui) {
        ui.label("Or Upload CSV File:");
        ui.add_space(FORM_LABEL_GAP);
        let file = self.controller.ui.form.file.clone();
        ui.horizontal(|ui| {
            if ui.button("Choose CSV…").clicked() {
                self.controller.choose_file_via_dialog();
            }
            match file {
                Some(path) => {
                    let name = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    ui.label(name).on_hover_text(path.display().to_string());
                    if ui.small_button("Clear").clicked() {
                        self.controller.clear_file();
                    }
                }
                None => {
                    ui.label(RichText::new("No file chosen").color(style::palette().text_muted));
                }
            }
        });
    }

    fn render_submit_button(&mut self, ui: &mut Ui) {
        let label =
            RichText::new(self.controller.ui.form.submit_label()).color(egui::Color32::WHITE);
        let button = egui::Button::new(label)
            .fill(style::SUBMIT_FILL)
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add(button).clicked() {
            self.controller.submit_prediction();
        }
    }
}
