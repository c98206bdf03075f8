/// Phrase cap applied when the shared credential pays for the calls.
pub const DEFAULT_SHARED_MAX_LINES: usize = 5;

/// Which credential authorizes the remote calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OperatingMode {
    /// The pre-provisioned application key; batches are capped.
    #[default]
    Shared,
    /// A key typed in by the user; batches are uncapped.
    SelfFunded,
}

impl OperatingMode {
    pub const ALL: [OperatingMode; 2] = [OperatingMode::Shared, OperatingMode::SelfFunded];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Shared => "Standard mode",
            Self::SelfFunded => "Own API key",
        }
    }

    /// Hover help for the phrase box.
    pub fn phrase_help(self, max_lines: Option<usize>) -> String {
        match (self, max_lines) {
            (Self::Shared, Some(max)) => {
                format!("Enter at least 2 phrases, one per line. At most {max} are classified per run.")
            }
            _ => "Enter at least 2 phrases, one per line.".to_string(),
        }
    }
}

/// Where the bearer credential for a run comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Secret provisioned through process configuration, if any.
    Configured(Option<String>),
    /// Plain-text key entered in the form.
    UserSupplied(String),
}

impl CredentialSource {
    /// Trimmed credential, or `None` when nothing usable is available.
    pub fn token(&self) -> Option<&str> {
        let raw = match self {
            Self::Configured(token) => token.as_deref()?,
            Self::UserSupplied(token) => token.as_str(),
        };
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn is_user_supplied(&self) -> bool {
        matches!(self, Self::UserSupplied(_))
    }
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Configured(_) => "Configured",
            Self::UserSupplied(_) => "UserSupplied",
        };
        let state = if self.token().is_some() { "<set>" } else { "<empty>" };
        write!(f, "{kind}({state})")
    }
}

/// Parameters that distinguish the operating modes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeProfile {
    pub mode: OperatingMode,
    pub credential: CredentialSource,
    pub max_batch_size: Option<usize>,
}

impl ModeProfile {
    pub fn shared(token: Option<String>, max_lines: usize) -> Self {
        Self {
            mode: OperatingMode::Shared,
            credential: CredentialSource::Configured(token),
            max_batch_size: Some(max_lines.max(1)),
        }
    }

    pub fn self_funded(token: impl Into<String>) -> Self {
        Self {
            mode: OperatingMode::SelfFunded,
            credential: CredentialSource::UserSupplied(token.into()),
            max_batch_size: None,
        }
    }
}
