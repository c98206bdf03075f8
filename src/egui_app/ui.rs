//! egui renderer for the application UI.

mod form_panel;
mod mode_menu;
mod results_grid;
mod status_bar;
pub mod style;

use std::time::Duration;

use eframe::egui;

use crate::egui_app::controller::EguiController;

/// Minimum window size that keeps the form and grid usable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(760.0, 540.0);
const RUNNING_REPAINT: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app, loading persisted configuration and secrets.
    pub fn new() -> Result<Self, String> {
        let controller =
            EguiController::from_disk().map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self::with_controller(controller))
    }

    pub fn with_controller(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_status(ctx);
        self.render_mode_menu(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let submitted = self.render_form(ui);
                    self.controller.drive_frame(submitted);
                    ui.add_space(12.0);
                    self.render_outcome(ui);
                });
        });
        if self.controller.any_running() {
            ctx.request_repaint_after(RUNNING_REPAINT);
        }
    }
}
