use super::EguiApp;
use super::style;
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, Ui};

impl EguiApp {
    pub(super) fn render_result(&mut self, ui: &mut Ui) {
        let Some(result) = self.controller.ui.form.result.as_ref() else {
            return;
        };
        Frame::new()
            .fill(style::result_fill(result))
            .corner_radius(CornerRadius::same(5))
            .inner_margin(Margin::same(15))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(result.display_text())
                        .color(egui::Color32::WHITE)
                        .strong(),
                );
            });
    }
}
