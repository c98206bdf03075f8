//! Form validation and batch classification pipeline.
//!
//! Everything here is UI-free: the egui layer feeds raw form input into
//! [`evaluate`], runs accepted submissions through [`classify_batch`], and
//! renders the resulting [`ResultTable`].

mod batch;
mod mode;
mod pipeline;
mod table;
mod validate;

pub use batch::{LineBatch, NormalizedBatch, TruncationNotice, normalize_lines};
pub use mode::{CredentialSource, DEFAULT_SHARED_MAX_LINES, ModeProfile, OperatingMode};
pub use pipeline::{BatchProgress, ClassifyError, LineClassifier, classify_batch};
pub use table::{
    ClassificationResult, ResultColumn, ResultRow, ResultTable, format_percent,
};
pub use validate::{
    AcceptedSubmission, FormInput, Gate, InputError, LabelSet, SessionState, evaluate,
    normalize_labels,
};
