use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use thiserror::Error;

use crate::atomic_file::atomic_write;
use crate::classify::ResultTable;
use crate::config::ExportSettings;

/// Errors raised while encoding or writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown export encoding {0:?}")]
    UnknownEncoding(String),
    /// The text holds characters the target encoding cannot represent.
    #[error("{encoding} cannot represent {sample:?}")]
    Unmappable { encoding: String, sample: String },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Render the table as CSV text with a leading unnamed index column.
pub fn render_csv(table: &ResultTable, settings: &ExportSettings) -> String {
    let headers = &settings.headers;
    let mut out = String::new();
    push_record(
        &mut out,
        &["", &headers.text, &headers.labels, &headers.scores],
    );
    for (index, row) in table.rows().iter().enumerate() {
        push_record(
            &mut out,
            &[
                &index.to_string(),
                &row.text,
                &list_literal(&row.labels),
                &list_literal(&row.scores),
            ],
        );
    }
    out
}

/// Render and encode the table with the configured text encoding.
pub fn encode_csv(table: &ResultTable, settings: &ExportSettings) -> Result<Vec<u8>, ExportError> {
    let encoding = Encoding::for_label(settings.encoding.trim().as_bytes())
        .ok_or_else(|| ExportError::UnknownEncoding(settings.encoding.clone()))?;
    let text = render_csv(table, settings);
    let (bytes, _, had_errors) = encoding.encode(&text);
    if had_errors {
        return Err(ExportError::Unmappable {
            encoding: encoding.name().to_string(),
            sample: first_unmappable(encoding, &text),
        });
    }
    Ok(bytes.into_owned())
}

/// Write encoded bytes to `path`, replacing any existing file atomically.
pub fn write_csv(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    atomic_write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn first_unmappable(encoding: &'static Encoding, text: &str) -> String {
    let mut buf = [0u8; 4];
    text.chars()
        .find(|ch| encoding.encode(ch.encode_utf8(&mut buf)).2)
        .map(String::from)
        .unwrap_or_default()
}

fn push_record(out: &mut String, fields: &[&str]) {
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Format a list the way a list cell reads in the downloaded file: `['a', 'b']`.
fn list_literal(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote_item(item)).collect();
    format!("[{}]", quoted.join(", "))
}

fn quote_item(item: &str) -> String {
    let quote = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for ch in item.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
