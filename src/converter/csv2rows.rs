//! CSV text -> rows of cells.
//!
//! Two strategies are available. [`Splitter::Naive`] splits on newlines and
//! commas after hiding commas inside quoted spans behind an escape token. It
//! is a heuristic, not a CSV parser: escaped (doubled) quotes, nested quotes,
//! quoted newlines and quoted cells without a comma are not understood, and a
//! quoted cell only loses its quotes when it contains at least one comma.
//! [`Splitter::Quoted`] hands the text to the `csv` crate instead.

use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Stands in for commas that belong to cell contents while the naive
/// splitter cuts rows on `,`.
pub const ESCAPE_TOKEN: &str = "^&^&^&";

// A double quote, anything, a comma, anything, a double quote. `.` stops at
// newlines, so a quoted span never crosses rows.
static ESCAPED_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"".*?,.*?""#).expect("escaped comma pattern compiles"));

/// A table as read from CSV: rows in input order, cells as raw strings.
/// Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvDocument {
    pub rows: Vec<Vec<String>>,
}

impl CsvDocument {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Splitter {
    /// Regex comma-escaping followed by plain splits on `\n` and `,`.
    #[default]
    Naive,
    /// Quote-aware parsing through the `csv` crate.
    Quoted,
}

impl Splitter {
    pub fn split(self, text: &str) -> Result<CsvDocument> {
        let document = match self {
            Splitter::Naive => split_naive(text),
            Splitter::Quoted => split_quoted(text)?,
        };
        debug!(splitter = %self, rows = document.row_count(), "split csv text");
        Ok(document)
    }
}

impl FromStr for Splitter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(Splitter::Naive),
            "quoted" => Ok(Splitter::Quoted),
            _ => Err(Error::UnknownSplitter(s.to_string())),
        }
    }
}

impl fmt::Display for Splitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Splitter::Naive => write!(f, "naive"),
            Splitter::Quoted => write!(f, "quoted"),
        }
    }
}

/// Replaces the commas of every quoted span that contains one with
/// [`ESCAPE_TOKEN`] and strips the span's surrounding quotes.
pub fn escape_commas(text: &str) -> Cow<'_, str> {
    ESCAPED_COMMA.replace_all(text, |caps: &Captures| {
        let quoted = &caps[0];
        trace!(quoted, "escaping quoted commas");
        quoted[1..quoted.len() - 1].replace(',', ESCAPE_TOKEN)
    })
}

/// Splits `text` into rows on `\n` and into cells on `,`, keeping commas
/// of quoted spans inside their cell.
///
/// Never fails. An empty string is one row holding one empty cell, and a
/// trailing newline yields a trailing row of the same shape.
pub fn split_naive(text: &str) -> CsvDocument {
    let escaped = escape_commas(text);
    let rows = escaped
        .split('\n')
        .map(|line| {
            line.split(',')
                .map(|cell| cell.replace(ESCAPE_TOKEN, ","))
                .collect::<Vec<_>>()
        })
        .collect();
    CsvDocument { rows }
}

/// Parses `text` as real CSV. Blank lines are dropped by the reader; if no
/// record remains the document still holds a single empty row so the table
/// is never rendered without one.
pub fn split_quoted(text: &str) -> Result<CsvDocument> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    if rows.is_empty() {
        rows.push(vec![String::new()]);
    }

    Ok(CsvDocument { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rows(document: &CsvDocument) -> Vec<Vec<&str>> {
        document
            .rows
            .iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_escape_commas_strips_quotes() {
        assert_eq!(escape_commas(r#""1,2",3"#), "1^&^&^&2,3");
    }

    #[test]
    fn test_escape_commas_leaves_plain_text_borrowed() {
        assert!(matches!(escape_commas("a,b\n1,2"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_commas_keeps_quotes_without_comma() {
        assert_eq!(escape_commas(r#""abc",d"#), r#""abc",d"#);
    }

    #[test]
    fn test_escape_commas_does_not_cross_lines() {
        assert_eq!(escape_commas("\"a\nb,c\""), "\"a\nb,c\"");
    }

    #[rstest]
    #[case("", vec![vec![""]])]
    #[case("a,b\n1,2", vec![vec!["a", "b"], vec!["1", "2"]])]
    #[case("a,b\n", vec![vec!["a", "b"], vec![""]])]
    #[case("a\nb,c,d", vec![vec!["a"], vec!["b", "c", "d"]])]
    #[case(r#""1,2",3"#, vec![vec!["1,2", "3"]])]
    #[case(r#"x,"a,b,c",y"#, vec![vec!["x", "a,b,c", "y"]])]
    #[case(r#""1,2","3,4""#, vec![vec!["1,2", "3,4"]])]
    fn test_split_naive(#[case] text: &str, #[case] expected: Vec<Vec<&str>>) {
        assert_eq!(rows(&split_naive(text)), expected);
    }

    #[test]
    fn test_split_naive_row_count_matches_lines() {
        let text = "a,b\nc,d\n\ne";
        assert_eq!(split_naive(text).row_count(), text.split('\n').count());
    }

    #[rstest]
    #[case("", vec![vec![""]])]
    #[case("a,b\n1,2", vec![vec!["a", "b"], vec!["1", "2"]])]
    #[case("a,b\n1,2\n", vec![vec!["a", "b"], vec!["1", "2"]])]
    #[case(r#""1,2",3"#, vec![vec!["1,2", "3"]])]
    #[case(r#""say ""hi""",x"#, vec![vec![r#"say "hi""#, "x"]])]
    #[case("\"two\nlines\",x", vec![vec!["two\nlines", "x"]])]
    #[case("a\nb,c", vec![vec!["a"], vec!["b", "c"]])]
    fn test_split_quoted(#[case] text: &str, #[case] expected: Vec<Vec<&str>>) {
        assert_eq!(rows(&split_quoted(text).unwrap()), expected);
    }

    #[rstest]
    #[case("naive", Splitter::Naive)]
    #[case("Quoted", Splitter::Quoted)]
    fn test_splitter_from_str(#[case] name: &str, #[case] expected: Splitter) {
        assert_eq!(name.parse::<Splitter>().unwrap(), expected);
    }

    #[test]
    fn test_splitter_from_str_unknown() {
        let err = "regex".parse::<Splitter>().unwrap_err();
        assert!(matches!(err, Error::UnknownSplitter(name) if name == "regex"));
    }

    #[test]
    fn test_splitter_default_is_naive() {
        assert_eq!(Splitter::default(), Splitter::Naive);
        assert_eq!(Splitter::Naive.to_string(), "naive");
    }
}
