use std::collections::HashSet;

use super::batch::{LineBatch, TruncationNotice, normalize_lines};
use super::mode::{ModeProfile, OperatingMode};

/// Raw form contents for one render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInput {
    /// Multi-line phrase text exactly as typed.
    pub text: String,
    /// Labels from the tag input.
    pub labels: Vec<String>,
}

/// User-correctable problems with a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("No API key entered.")]
    MissingCredential,
    #[error("No shared API token is configured. Add API_TOKEN to secrets.toml or use your own API key.")]
    SharedCredentialMissing,
    #[error("No phrases entered.")]
    NoPhrases,
    #[error("No classification labels added yet.")]
    NoLabels,
    #[error("Add at least two distinct labels.")]
    SingleLabel,
}

/// Candidate labels with empty and repeated entries removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Drop empty labels and repeats, keeping first-occurrence order.
pub fn normalize_labels(labels: &[String]) -> LabelSet {
    let mut seen = HashSet::new();
    LabelSet(
        labels
            .iter()
            .filter(|label| !label.is_empty())
            .filter(|label| seen.insert(label.as_str()))
            .cloned()
            .collect(),
    )
}

/// A submission that passed validation and may be classified.
#[derive(Clone, PartialEq, Eq)]
pub struct AcceptedSubmission {
    /// Identifier unique within the owning [`SessionState`].
    pub id: u64,
    pub mode: OperatingMode,
    pub batch: LineBatch,
    pub labels: LabelSet,
    pub credential: String,
    pub truncation: Option<TruncationNotice>,
}

impl std::fmt::Debug for AcceptedSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcceptedSubmission")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("batch", &self.batch)
            .field("labels", &self.labels)
            .field("truncation", &self.truncation)
            .finish_non_exhaustive()
    }
}

/// Per-session memory of whether a valid submission was accepted.
///
/// Only [`evaluate`] mutates it; the render driver reads it to decide
/// whether the last outcome should stay on screen.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    accepted: Option<AcceptedSubmission>,
    next_id: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission_accepted(&self) -> bool {
        self.accepted.is_some()
    }

    pub fn last_accepted(&self) -> Option<&AcceptedSubmission> {
        self.accepted.as_ref()
    }

    /// True when `id` is still the accepted submission.
    pub fn is_current(&self, id: u64) -> bool {
        self.accepted.as_ref().is_some_and(|accepted| accepted.id == id)
    }

    fn accept(&mut self, mut submission: AcceptedSubmission) -> AcceptedSubmission {
        self.next_id += 1;
        submission.id = self.next_id;
        self.accepted = Some(submission.clone());
        submission
    }

    fn clear(&mut self) {
        self.accepted = None;
    }
}

/// What the render driver should do after evaluating the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Nothing submitted yet; show only the form.
    Halt,
    /// The submission was refused; show the warning.
    Rejected(InputError),
    /// A new submission was accepted and must be classified.
    Classify(AcceptedSubmission),
    /// No new submission; keep showing the outcome of the accepted one.
    Replay { submission_id: u64 },
}

/// Apply the submission rules in order and update `session` accordingly.
pub fn evaluate(
    form: &FormInput,
    submitted: bool,
    profile: &ModeProfile,
    session: &mut SessionState,
) -> Gate {
    let Some(credential) = profile.credential.token() else {
        session.clear();
        let error = if profile.credential.is_user_supplied() {
            InputError::MissingCredential
        } else {
            InputError::SharedCredentialMissing
        };
        return Gate::Rejected(error);
    };

    if !submitted {
        return match session.last_accepted() {
            Some(accepted) => Gate::Replay {
                submission_id: accepted.id,
            },
            None => Gate::Halt,
        };
    }

    if let Err(error) = check_submission(form) {
        session.clear();
        return Gate::Rejected(error);
    }

    let normalized = normalize_lines(&form.text, profile.max_batch_size);
    let truncation = normalized.truncation();
    let accepted = session.accept(AcceptedSubmission {
        id: 0,
        mode: profile.mode,
        batch: normalized.batch,
        labels: normalize_labels(&form.labels),
        credential: credential.to_string(),
        truncation,
    });
    Gate::Classify(accepted)
}

fn check_submission(form: &FormInput) -> Result<(), InputError> {
    if form.text.is_empty() {
        return Err(InputError::NoPhrases);
    }
    match normalize_labels(&form.labels).len() {
        0 => Err(InputError::NoLabels),
        1 => Err(InputError::SingleLabel),
        _ => Ok(()),
    }
}
