use std::path::PathBuf;

use crate::classify::InputError;
use crate::egui_app::ui::style::StatusTone;

#[derive(Clone, Debug)]
pub(crate) enum StatusMessage {
    Classifying { count: usize },
    ClassificationComplete { count: usize },
    ClassificationFailed { err: String },
    InputRejected(InputError),
    TagLimitReached { max: usize },
    DuplicateTag { tag: String },
    NothingToExport,
    Exported { path: PathBuf, rows: usize },
    ExportFailed { err: String },
    TokenPageFailed { url: String, err: String },
}

impl StatusMessage {
    pub(crate) fn into_text_and_tone(self) -> (String, StatusTone) {
        match self {
            StatusMessage::Classifying { count } => (
                format!("Classifying {count} phrase{}...", plural(count)),
                StatusTone::Busy,
            ),
            StatusMessage::ClassificationComplete { count } => (
                format!("Classification complete: {count} phrase{}", plural(count)),
                StatusTone::Info,
            ),
            StatusMessage::ClassificationFailed { err } => (err, StatusTone::Error),
            StatusMessage::InputRejected(err) => (err.to_string(), StatusTone::Warning),
            StatusMessage::TagLimitReached { max } => {
                (format!("At most {max} labels allowed"), StatusTone::Warning)
            }
            StatusMessage::DuplicateTag { tag } => {
                (format!("Label {tag:?} is already added"), StatusTone::Warning)
            }
            StatusMessage::NothingToExport => {
                ("Nothing to export yet".into(), StatusTone::Warning)
            }
            StatusMessage::Exported { path, rows } => (
                format!("Exported {rows} row{} to {}", plural(rows), path.display()),
                StatusTone::Info,
            ),
            StatusMessage::ExportFailed { err } => {
                (format!("Export failed: {err}"), StatusTone::Error)
            }
            StatusMessage::TokenPageFailed { url, err } => (
                format!("Could not open {url}: {err}"),
                StatusTone::Error,
            ),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
