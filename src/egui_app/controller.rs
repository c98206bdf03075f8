//! Bridges the classify pipeline to the egui renderer.

mod export;
mod form;
mod jobs;
mod status_message;
mod submission;

#[cfg(test)]
mod tests;

pub use jobs::{ClassifierFactory, hosted_classifier_factory};

use crate::classify::{ModeProfile, OperatingMode, SessionState};
use crate::config::{self, AppConfig, ConfigError};
use crate::egui_app::state::UiState;
use crate::egui_app::ui::style::StatusTone;
use jobs::ControllerJobs;
use status_message::StatusMessage;

/// Maintains app state and bridges core logic to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    config: AppConfig,
    shared_token: Option<String>,
    shared_session: SessionState,
    self_funded_session: SessionState,
    jobs: ControllerJobs,
    classifier_factory: ClassifierFactory,
}

impl EguiController {
    pub fn new(
        config: AppConfig,
        shared_token: Option<String>,
        classifier_factory: ClassifierFactory,
    ) -> Self {
        Self {
            ui: UiState::new(&config.form),
            config,
            shared_token,
            shared_session: SessionState::new(),
            self_funded_session: SessionState::new(),
            jobs: ControllerJobs::new(),
            classifier_factory,
        }
    }

    /// Load settings and the shared secret from the app directory.
    pub fn from_disk() -> Result<Self, ConfigError> {
        let config = config::load_or_default()?;
        let shared_token = config::load_shared_token()?;
        if shared_token.is_none() {
            tracing::warn!("No shared API token configured; standard mode is unavailable");
        }
        let factory = hosted_classifier_factory(config.inference.endpoint_url()?);
        Ok(Self::new(config, shared_token, factory))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Phrase cap for `mode`, `None` when uncapped.
    pub fn max_lines(&self, mode: OperatingMode) -> Option<usize> {
        self.profile_for(mode).max_batch_size
    }

    pub fn select_mode(&mut self, mode: OperatingMode) {
        if self.ui.mode != mode {
            tracing::debug!("Switched to {}", mode.display_name());
            self.ui.mode = mode;
        }
    }

    pub fn is_running(&self, mode: OperatingMode) -> bool {
        self.ui.workspace(mode).outcome.is_running()
    }

    pub fn any_running(&self) -> bool {
        OperatingMode::ALL.iter().any(|mode| self.is_running(*mode))
    }

    fn profile_for(&self, mode: OperatingMode) -> ModeProfile {
        match mode {
            OperatingMode::Shared => ModeProfile::shared(
                self.shared_token.clone(),
                self.config.inference.shared_max_lines,
            ),
            OperatingMode::SelfFunded => {
                ModeProfile::self_funded(self.ui.self_funded.form.api_key.clone())
            }
        }
    }

    fn session_mut(&mut self, mode: OperatingMode) -> &mut SessionState {
        match mode {
            OperatingMode::Shared => &mut self.shared_session,
            OperatingMode::SelfFunded => &mut self.self_funded_session,
        }
    }

    fn session(&self, mode: OperatingMode) -> &SessionState {
        match mode {
            OperatingMode::Shared => &self.shared_session,
            OperatingMode::SelfFunded => &self.self_funded_session,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }

    fn set_status_message(&mut self, message: StatusMessage) {
        let (text, tone) = message.into_text_and_tone();
        self.set_status(text, tone);
    }
}
