use eframe::egui::{self, RichText};

use super::EguiApp;
use super::style;
use crate::classify::OperatingMode;

impl EguiApp {
    /// Draw the form for the active mode. Returns true when Classify was pressed.
    pub(super) fn render_form(&mut self, ui: &mut egui::Ui) -> bool {
        let palette = style::palette();
        let mode = self.controller.ui.mode;
        ui.heading("Zero-shot text classification");
        ui.add_space(8.0);

        if mode == OperatingMode::SelfFunded {
            self.render_api_key_row(ui);
            ui.add_space(6.0);
        }
        if let Some(notice) = self.controller.ui.active().notice {
            ui.colored_label(palette.warning, notice.to_string());
            ui.add_space(6.0);
        }

        self.render_tag_input(ui);
        ui.add_space(10.0);

        let max_lines = self.controller.max_lines(mode);
        ui.label("Phrases").on_hover_text(mode.phrase_help(max_lines));
        let form = &mut self.controller.ui.active_mut().form;
        ui.add(
            egui::TextEdit::multiline(&mut form.text)
                .desired_rows(6)
                .desired_width(f32::INFINITY)
                .hint_text("One phrase per line"),
        );
        if let Some(notice) = form.live_truncation(max_lines) {
            ui.label(RichText::new(notice.message()).color(palette.muted));
        }
        ui.add_space(8.0);

        let running = self.controller.is_running(mode);
        ui.add_enabled(!running, egui::Button::new("Classify")).clicked()
    }

    fn render_api_key_row(&mut self, ui: &mut egui::Ui) {
        let help_url = self.controller.config().inference.token_help_url.clone();
        let mut open_help = false;
        ui.horizontal(|ui| {
            ui.label("API key");
            ui.add(
                egui::TextEdit::singleline(&mut self.controller.ui.self_funded.form.api_key)
                    .hint_text("Paste your API token")
                    .desired_width(320.0),
            );
            open_help = ui
                .button("Get a token")
                .on_hover_text(help_url.as_str())
                .clicked();
        });
        if open_help {
            self.controller.open_token_help();
        }
    }

    fn render_tag_input(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let max_tags = self.controller.config().form.max_tags;
        let labels = self.controller.ui.active().form.labels.clone();
        let mut remove = None;
        ui.horizontal(|ui| {
            ui.label("Labels");
            ui.label(
                RichText::new(format!("{}/{max_tags}", labels.len())).color(palette.muted),
            );
        });
        ui.horizontal_wrapped(|ui| {
            for (index, label) in labels.iter().enumerate() {
                if ui
                    .button(format!("{label} ×"))
                    .on_hover_text("Remove label")
                    .clicked()
                {
                    remove = Some(index);
                }
            }
        });
        if let Some(index) = remove {
            self.controller.remove_tag(index);
        }

        let response = ui.add(
            egui::TextEdit::singleline(&mut self.controller.ui.active_mut().form.tag_input)
                .hint_text("Type a label and press Enter")
                .desired_width(240.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.controller.add_tag_from_input();
            response.request_focus();
        }

        let suggestions: Vec<String> = self
            .controller
            .ui
            .active()
            .form
            .suggestions(&self.controller.config().form.label_suggestions)
            .into_iter()
            .map(str::to_string)
            .collect();
        if suggestions.is_empty() {
            return;
        }
        let mut picked = None;
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Suggestions:").color(palette.muted).small());
            for suggestion in &suggestions {
                if ui.small_button(suggestion.as_str()).clicked() {
                    picked = Some(suggestion.clone());
                }
            }
        });
        if let Some(tag) = picked {
            self.controller.add_tag(&tag);
        }
    }
}
