//! Colours and widget visuals for the classifier window.

use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub surface: Color32,
    pub panel: Color32,
    pub widget: Color32,
    pub widget_weak: Color32,
    pub outline: Color32,
    pub text: Color32,
    pub muted: Color32,
    pub accent: Color32,
    pub warning: Color32,
    pub success: Color32,
}

const PALETTE: Palette = Palette {
    surface: Color32::from_rgb(16, 18, 22),
    panel: Color32::from_rgb(24, 27, 33),
    widget: Color32::from_rgb(38, 43, 52),
    widget_weak: Color32::from_rgb(31, 35, 42),
    outline: Color32::from_rgb(52, 58, 68),
    text: Color32::from_rgb(208, 212, 220),
    muted: Color32::from_rgb(136, 144, 158),
    accent: Color32::from_rgb(120, 190, 250),
    warning: Color32::from_rgb(226, 140, 92),
    success: Color32::from_rgb(110, 190, 140),
};

pub fn palette() -> Palette {
    PALETTE
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let p = PALETTE;
    visuals.panel_fill = p.panel;
    visuals.window_fill = p.surface;
    visuals.extreme_bg_color = p.surface;
    visuals.faint_bg_color = p.widget_weak;
    visuals.override_text_color = Some(p.text);
    visuals.hyperlink_color = p.accent;
    visuals.warn_fg_color = p.warning;
    visuals.error_fg_color = p.warning;
    visuals.selection.bg_fill = p.widget;
    visuals.selection.stroke = Stroke::new(1.0, p.accent);
    visuals.widgets.noninteractive.bg_fill = p.panel;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, p.text);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        square_widget(widget);
    }
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, p.accent);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
}

fn square_widget(widget: &mut WidgetVisuals) {
    widget.corner_radius = CornerRadius::ZERO;
    widget.bg_fill = PALETTE.widget;
    widget.weak_bg_fill = PALETTE.widget_weak;
    widget.bg_stroke = Stroke::new(1.0, PALETTE.outline);
    widget.fg_stroke = Stroke::new(1.0, PALETTE.text);
}

/// One-pixel outline around panels and the status badge.
pub fn outline_stroke() -> Stroke {
    Stroke::new(1.0, PALETTE.outline)
}

/// Severity of a status bar message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

impl StatusTone {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Busy => "Working",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }

    pub fn badge_color(self) -> Color32 {
        match self {
            Self::Idle => Color32::from_gray(60),
            Self::Busy => PALETTE.accent,
            Self::Info => PALETTE.success,
            Self::Warning => Color32::from_rgb(214, 170, 60),
            Self::Error => Color32::from_rgb(204, 70, 60),
        }
    }
}
