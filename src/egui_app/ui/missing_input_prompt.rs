use super::EguiApp;
use eframe::egui::{self, Align2, Color32, Order};

impl EguiApp {
    /// Modal notice shown when submit is pressed with no input.
    pub(super) fn render_missing_input_prompt(&mut self, ctx: &egui::Context) {
        let Some(message) = self.controller.ui.form.prompt.clone() else {
            return;
        };

        render_backdrop(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.dismiss_prompt();
            return;
        }

        let mut dismissed = false;
        egui::Window::new("Missing input")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(Order::Tooltip)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    let ok = ui.button("OK");
                    if ok.clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.controller.dismiss_prompt();
        }
    }
}

fn render_backdrop(ctx: &egui::Context) {
    let rect = ctx.viewport_rect();
    let painter = ctx.layer_painter(egui::LayerId::new(
        Order::Foreground,
        egui::Id::new("missing_input_backdrop_paint"),
    ));
    painter.rect_filled(rect, 0.0, Color32::from_rgba_premultiplied(0, 0, 0, 160));

    egui::Area::new(egui::Id::new("missing_input_backdrop_blocker"))
        .order(Order::Foreground)
        .fixed_pos(rect.min)
        .show(ctx, |ui| {
            ui.allocate_rect(rect, egui::Sense::click_and_drag());
        });
}
