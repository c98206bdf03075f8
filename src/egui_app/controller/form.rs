use super::EguiController;
use super::status_message::StatusMessage;
use crate::egui_app::state::TagAddOutcome;

impl EguiController {
    /// Commit the pending tag input of the active mode.
    pub fn add_tag_from_input(&mut self) {
        let pending = std::mem::take(&mut self.ui.active_mut().form.tag_input);
        if self.add_tag(&pending) == TagAddOutcome::LimitReached {
            self.ui.active_mut().form.tag_input = pending;
        }
    }

    pub fn add_tag(&mut self, tag: &str) -> TagAddOutcome {
        let max = self.config.form.max_tags;
        let outcome = self.ui.active_mut().form.add_tag(tag, max);
        match outcome {
            TagAddOutcome::Added | TagAddOutcome::Empty => {}
            TagAddOutcome::Duplicate => self.set_status_message(StatusMessage::DuplicateTag {
                tag: tag.trim().to_string(),
            }),
            TagAddOutcome::LimitReached => {
                self.set_status_message(StatusMessage::TagLimitReached { max })
            }
        }
        outcome
    }

    pub fn remove_tag(&mut self, index: usize) {
        self.ui.active_mut().form.remove_tag(index);
    }

    /// Open the page where users create their own API token.
    pub fn open_token_help(&mut self) {
        let url = self.config.inference.token_help_url.clone();
        if let Err(err) = open::that(&url) {
            tracing::warn!("Failed to open {url}: {err}");
            self.set_status_message(StatusMessage::TokenPageFailed {
                url,
                err: err.to_string(),
            });
        }
    }
}
