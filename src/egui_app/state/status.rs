use crate::egui_app::ui::style::StatusTone;

const HISTORY_LIMIT: usize = 50;
const IDLE_TEXT: &str = "Enter phrases and labels, then press Classify";

/// Footer message plus a short history shown on hover.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
    /// Oldest first.
    pub history: Vec<String>,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: IDLE_TEXT.to_string(),
            tone: StatusTone::Idle,
            history: Vec::new(),
        }
    }

    pub fn set(&mut self, text: impl Into<String>, tone: StatusTone) {
        let text = text.into();
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(text.clone());
        self.text = text;
        self.tone = tone;
    }

    pub fn badge_label(&self) -> &'static str {
        self.tone.label()
    }

    pub fn history_text(&self) -> String {
        self.history.join("\n")
    }
}
