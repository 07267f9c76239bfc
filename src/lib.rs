pub mod config;
pub mod converter;
pub mod error;
pub mod generator;

use std::path::Path;
use tracing::debug;

pub use converter::csv2rows::{CsvDocument, Splitter};
pub use error::{Error, Result};
pub use generator::csv2wiki::{FormattingOptions, render, render_document};

/// Number of leading header rows for the `--header` flag and the
/// `--bold-rows` count. A positive count wins over the flag; they never add.
pub fn resolve_header_rows(header: bool, bold_rows: usize) -> usize {
    if bold_rows > 0 {
        bold_rows
    } else if header {
        1
    } else {
        0
    }
}

// csv text -> wikitext
pub fn convert(csv_text: &str, options: &FormattingOptions, splitter: Splitter) -> Result<String> {
    let document = splitter.split(csv_text)?;
    Ok(render_document(&document, options))
}

/// Reads `file_path` as text and converts it. Line endings are normalized
/// to `\n` first, so CRLF files do not leave `\r` in their last cells.
pub fn convert_from_path(
    file_path: impl AsRef<Path>,
    options: &FormattingOptions,
    splitter: Splitter,
) -> Result<String> {
    let file_path = file_path.as_ref();
    let csv_text = std::fs::read_to_string(file_path).map_err(|source| Error::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    debug!(path = %file_path.display(), bytes = csv_text.len(), "read csv file");

    convert(&normalize_newlines(&csv_text), options, splitter)
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
