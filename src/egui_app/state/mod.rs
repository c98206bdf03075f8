//! Plain data the renderer reads and the controller mutates.

mod form;
mod results;
mod status;

pub use form::{FormState, TagAddOutcome};
pub use results::{BatchOutcome, GridViewState, RowGroup, SortDirection, arrange_rows};
pub use status::StatusBarState;

use crate::classify::{InputError, OperatingMode};
use crate::config::FormSettings;

/// Everything shown for one operating mode.
#[derive(Clone, Debug, Default)]
pub struct ModeWorkspace {
    pub form: FormState,
    pub outcome: BatchOutcome,
    pub grid: GridViewState,
    /// Warning raised by the last evaluation, if any.
    pub notice: Option<InputError>,
}

impl ModeWorkspace {
    fn with_presets(settings: &FormSettings) -> Self {
        Self {
            form: FormState::with_presets(settings),
            ..Self::default()
        }
    }
}

/// Top-level UI state.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Mode picked in the side menu.
    pub mode: OperatingMode,
    pub shared: ModeWorkspace,
    pub self_funded: ModeWorkspace,
    pub status: StatusBarState,
}

impl UiState {
    pub fn new(settings: &FormSettings) -> Self {
        Self {
            mode: OperatingMode::default(),
            shared: ModeWorkspace::with_presets(settings),
            self_funded: ModeWorkspace::with_presets(settings),
            status: StatusBarState::idle(),
        }
    }

    pub fn workspace(&self, mode: OperatingMode) -> &ModeWorkspace {
        match mode {
            OperatingMode::Shared => &self.shared,
            OperatingMode::SelfFunded => &self.self_funded,
        }
    }

    pub fn workspace_mut(&mut self, mode: OperatingMode) -> &mut ModeWorkspace {
        match mode {
            OperatingMode::Shared => &mut self.shared,
            OperatingMode::SelfFunded => &mut self.self_funded,
        }
    }

    pub fn active(&self) -> &ModeWorkspace {
        self.workspace(self.mode)
    }

    pub fn active_mut(&mut self) -> &mut ModeWorkspace {
        self.workspace_mut(self.mode)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(&FormSettings::default())
    }
}
