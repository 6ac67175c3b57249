#![deny(missing_docs)]

//! Entry point for the structural damage prediction form.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use damagecheck::config;
use damagecheck::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use damagecheck::logging;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_error) = match config::load_or_default() {
        Ok(settings) => (settings, None),
        Err(err) => (config::AppSettings::default(), Some(err)),
    };

    if let Err(err) = logging::init(Some(&settings.log_level)) {
        eprintln!("Logging disabled: {err}");
    }
    if let Some(err) = config_error {
        tracing::warn!("Using default settings: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([520.0, 640.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Structural Damage Prediction",
        native_options,
        Box::new(move |_cc| match EguiApp::new(&settings) {
            Ok(app) => Ok(Box::new(app)),
            Err(err) => {
                tracing::error!("{err}");
                Ok(Box::new(LaunchError { message: err }))
            }
        }),
    )?;
    Ok(())
}

struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
