//! CSV export of classification results.

mod csv;

pub use csv::{ExportError, encode_csv, render_csv, write_csv};
