#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based Demandcast UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use demandcast::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use demandcast::logging;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::Vec2::new(1080.0, 680.0));

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Demandcast",
        native_options,
        Box::new(|_cc| match EguiApp::new() {
            Ok(app) => Ok(Box::new(app)),
            Err(err) => Ok(Box::new(LaunchError { message: err })),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
///
/// Shown when the model artifact or configuration cannot be loaded; no
/// prediction is possible in that state, so the user must fix the path or
/// environment and restart.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("Demandcast failed to start");
                ui.add_space(8.0);
                ui.label(&self.message);
                ui.add_space(8.0);
                ui.label("Fix the model path or configuration and restart the application.");
            });
        });
    }
}
