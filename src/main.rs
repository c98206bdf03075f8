#![deny(missing_docs)]
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

//! Desktop entry point for the zero-shot phrase classifier.

use eframe::egui;
use zeroshot::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use zeroshot::logging;

const APP_TITLE: &str = "Zero-shot classifier";

fn main() -> eframe::Result {
    if let Err(err) = logging::init() {
        eprintln!("Continuing without log files: {err}");
    }
    eframe::run_native(
        APP_TITLE,
        native_options(),
        Box::new(|_cc| {
            let app: Box<dyn eframe::App> = match EguiApp::new() {
                Ok(app) => Box::new(app),
                Err(message) => {
                    tracing::error!("Startup failed: {message}");
                    Box::new(StartupFailure { message })
                }
            };
            Ok(app)
        }),
    )
}

fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size(MIN_VIEWPORT_SIZE),
        ..Default::default()
    }
}

/// Shown instead of the main window when config could not be loaded.
struct StartupFailure {
    message: String,
}

impl eframe::App for StartupFailure {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("The classifier could not start");
                ui.add_space(8.0);
                ui.label(&self.message);
                ui.add_space(8.0);
                ui.label("Fix or delete config.toml in the .zeroshot folder and relaunch.");
            });
        });
    }
}
