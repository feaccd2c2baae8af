//! Output parsers for the two shapes helm prints.
//!
//! Tabular text is a header line, whitespace separated rows and a trailing
//! blank line. A trailing cell that contains spaces (a description) is
//! rebuilt from the remaining tokens with a [`FieldRule`]. Structured output
//! is a JSON array of objects and is always preferred when helm offers it.

use super::models::{IntoRow, Row};
use super::HelmError;
use serde::de::DeserializeOwned;

/// How one cell is assembled from the whitespace tokens of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// A single token.
    Single(usize),
    /// Every token from `start` to the end of the line. May be empty.
    Rest(usize),
}

/// Expected layout of a tabular listing.
#[derive(Debug, Clone, Copy)]
pub struct TableShape {
    /// Used in parse error messages.
    pub what: &'static str,
    /// First token of the header line.
    pub header: &'static str,
    pub fields: &'static [FieldRule],
}

/// `helm plugin ls`
pub const PLUGIN_LIST: TableShape = TableShape {
    what: "plugin list",
    header: "NAME",
    fields: &[FieldRule::Single(0), FieldRule::Single(1), FieldRule::Rest(2)],
};

/// Parse a tabular listing. Empty output is an empty table.
pub fn parse_table(output: &str, shape: &TableShape) -> Result<Vec<Row>, HelmError> {
    let mut lines = output.lines();
    let header = match lines.next() {
        Some(line) if line.trim().is_empty() => return Ok(Vec::new()),
        Some(line) => line,
        None => return Ok(Vec::new()),
    };

    if header.split_whitespace().next() != Some(shape.header) {
        return Err(HelmError::Parse {
            what: shape.what,
            reason: format!("unexpected header {:?}", header.trim()),
        });
    }

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(line, shape))
        .collect()
}

fn parse_line(line: &str, shape: &TableShape) -> Result<Row, HelmError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let missing = || HelmError::Parse {
        what: shape.what,
        reason: format!("too few fields in {:?}", line.trim()),
    };

    shape
        .fields
        .iter()
        .map(|rule| match *rule {
            FieldRule::Single(index) => tokens.get(index).map(|t| (*t).to_string()).ok_or_else(missing),
            FieldRule::Rest(start) => Ok(tokens.get(start..).map(|slice| slice.join(" ")).unwrap_or_default()),
        })
        .collect()
}

/// Parse a JSON object list into rows.
pub fn parse_json<T>(output: &str, what: &'static str) -> Result<Vec<Row>, HelmError>
where
    T: DeserializeOwned + IntoRow,
{
    Ok(parse_records::<T>(output, what)?.into_iter().map(IntoRow::into_row).collect())
}

/// Parse a JSON object list into records.
pub fn parse_records<T: DeserializeOwned>(output: &str, what: &'static str) -> Result<Vec<T>, HelmError> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(|e| HelmError::Parse {
        what,
        reason: e.to_string(),
    })
}

/// `helm get values` prints a `USER-SUPPLIED VALUES:` banner first.
pub fn strip_first_line(output: &str) -> String {
    match output.split_once('\n') {
        Some((_, rest)) => rest.to_string(),
        None => String::new(),
    }
}
