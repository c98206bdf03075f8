use eframe::egui::{self, RichText};

use super::EguiApp;
use super::style;
use crate::classify::OperatingMode;

impl EguiApp {
    pub(super) fn render_mode_menu(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::SidePanel::left("mode_menu")
            .resizable(false)
            .default_width(190.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("Mode").color(palette.muted));
                ui.add_space(4.0);
                for mode in OperatingMode::ALL {
                    let selected = self.controller.ui.mode == mode;
                    let mut label = mode.display_name().to_string();
                    if self.controller.is_running(mode) {
                        label.push_str(" …");
                    }
                    if ui.selectable_label(selected, label).clicked() {
                        self.controller.select_mode(mode);
                    }
                }
                ui.add_space(12.0);
                ui.separator();
                let hint = match self.controller.ui.mode {
                    OperatingMode::Shared => format!(
                        "Uses the app's API key. Up to {} phrases per run.",
                        self.controller.config().inference.shared_max_lines
                    ),
                    OperatingMode::SelfFunded => {
                        "Uses your own API key. No phrase limit.".to_string()
                    }
                };
                ui.label(RichText::new(hint).color(palette.muted).small());
            });
    }
}
