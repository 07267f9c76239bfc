use tracing::debug;

use crate::converter::csv2rows::{CsvDocument, ESCAPE_TOKEN, split_naive};

pub const DEFAULT_TABLE_CLASS: &str = "wikitable";

const CAPTION_MARKER: &str = "|+";
const HEADER_MARKER: &str = "!";
const HEADER_SEPARATOR: &str = "!!";
const DATA_MARKER: &str = "|";
const DATA_SEPARATOR: &str = "||";
const ROW_SEPARATOR: &str = "|-";
const TABLE_CLOSE: &str = "|}";

/// How a [`CsvDocument`] is laid out as a wikitext table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingOptions {
    /// Rendered as `|+caption` before the first row. Empty means none.
    pub caption: Option<String>,
    /// Number of leading rows rendered as header cells
    pub header_rows: usize,
    /// Value of the table's `class` attribute
    pub table_class: String,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            caption: None,
            header_rows: 0,
            table_class: DEFAULT_TABLE_CLASS.to_string(),
        }
    }
}

/// Converts CSV text straight to a `wikitable`, splitting it with the naive
/// quoted-comma heuristic.
///
/// ```
/// let table = csv2wiki::render("a,b\n1,2", None, 1);
/// assert_eq!(table, "{| class=\"wikitable\"\n!a!!b\n|-\n|1||2\n|-\n|}");
/// ```
pub fn render(csv_text: &str, caption: Option<&str>, header_row_count: usize) -> String {
    let options = FormattingOptions {
        caption: caption.map(str::to_string),
        header_rows: header_row_count,
        ..FormattingOptions::default()
    };
    render_document(&split_naive(csv_text), &options)
}

/// Renders every row of `document` followed by a row separator, header rows
/// first, between the table's open and close markers.
pub fn render_document(document: &CsvDocument, options: &FormattingOptions) -> String {
    debug!(
        rows = document.row_count(),
        header_rows = options.header_rows,
        "rendering wikitable"
    );

    let mut lines = vec![format!("{{| class=\"{}\"", options.table_class)];

    for (n, row) in document.rows.iter().enumerate() {
        if n == 0
            && let Some(caption) = options.caption.as_deref().filter(|c| !c.is_empty())
        {
            lines.push(format!("{CAPTION_MARKER}{}", caption.replace(ESCAPE_TOKEN, ",")));
        }

        if n < options.header_rows {
            lines.push(format!("{HEADER_MARKER}{}", row.join(HEADER_SEPARATOR)));
        } else {
            lines.push(format!("{DATA_MARKER}{}", row.join(DATA_SEPARATOR)));
        }
        lines.push(ROW_SEPARATOR.to_string());
    }

    lines.push(TABLE_CLOSE.to_string());
    lines.join("\n")
}
