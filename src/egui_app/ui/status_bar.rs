use eframe::egui::{self, Frame, Margin, RichText, Sense, StrokeKind, vec2};

use super::EguiApp;
use super::style;

const BADGE_SIZE: f32 = 14.0;

impl EguiApp {
    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        let status = &self.controller.ui.status;
        let frame = Frame::new()
            .fill(palette.surface)
            .stroke(style::outline_stroke())
            .inner_margin(Margin::symmetric(8, 4));
        egui::TopBottomPanel::bottom("status_bar")
            .frame(frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(vec2(BADGE_SIZE, BADGE_SIZE), Sense::hover());
                    let painter = ui.painter();
                    painter.rect_filled(rect, 0.0, status.tone.badge_color());
                    painter.rect_stroke(rect, 0.0, style::outline_stroke(), StrokeKind::Inside);
                    ui.label(RichText::new(status.badge_label()).strong());
                    ui.separator();
                    let text = ui.label(RichText::new(&status.text).color(palette.text));
                    if !status.history.is_empty() {
                        text.on_hover_text(status.history_text());
                    }
                });
            });
    }
}
