use std::path::Path;

use rfd::FileDialog;

use super::EguiController;
use super::status_message::StatusMessage;
use crate::export::{encode_csv, write_csv};

impl EguiController {
    /// Ask for a destination and export the active mode's results.
    pub fn export_results_via_dialog(&mut self) {
        if self.ui.active().outcome.table().is_none() {
            self.set_status_message(StatusMessage::NothingToExport);
            return;
        }
        let Some(path) = FileDialog::new()
            .set_file_name(&self.config.export.file_name)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        self.export_results_to(&path);
    }

    /// Export the full result table in batch order, ignoring grid view settings.
    pub fn export_results_to(&mut self, path: &Path) {
        let Some(table) = self.ui.active().outcome.table() else {
            self.set_status_message(StatusMessage::NothingToExport);
            return;
        };
        let rows = table.len();
        let written = encode_csv(table, &self.config.export).and_then(|bytes| write_csv(path, &bytes));
        match written {
            Ok(()) => self.set_status_message(StatusMessage::Exported {
                path: path.to_path_buf(),
                rows,
            }),
            Err(err) => {
                tracing::warn!("Export to {} failed: {err}", path.display());
                self.set_status_message(StatusMessage::ExportFailed {
                    err: err.to_string(),
                });
            }
        }
    }
}
