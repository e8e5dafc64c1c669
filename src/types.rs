//! Type definitions for parsed CSV data

use crate::error::CsvError;
use indexmap::IndexMap;
use std::fmt;

/// A single decoded cell value
///
/// Cells are decoded as UTF-8 text by default. In raw mode the compacted
/// bytes are handed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CellValue {
    /// UTF-8 text (invalid sequences replaced during decoding)
    Text(String),
    /// Raw bytes, as produced in raw mode
    Raw(Vec<u8>),
}

impl CellValue {
    /// Trimmed text representation, used for every materialized record value
    pub fn into_trimmed_text(self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Raw(b) => String::from_utf8_lossy(&b).trim().to_string(),
        }
    }

    /// Untrimmed text representation
    pub fn into_text(self) -> String {
        match self {
            CellValue::Text(s) => s,
            CellValue::Raw(b) => String::from_utf8_lossy(&b).into_owned(),
        }
    }

    /// Check if the cell holds no bytes
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Text(s) => s.is_empty(),
            CellValue::Raw(b) => b.is_empty(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Raw(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// A materialized record: column key to trimmed value, in header order
///
/// Keys are header names, positional indices rendered as strings when
/// headers are disabled, or synthesized `_EMPTY_<n>` names for blank headers.
pub type Record = IndexMap<String, String>;

/// Argument bundle passed to a header-transform hook
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    /// Decoded header cell text
    pub header: &'a str,
    /// Zero-based column index
    pub index: usize,
}

/// Argument bundle passed to a value-transform hook
#[derive(Debug)]
pub struct ValueContext<'a> {
    /// Resolved header name for this column, if any
    pub header: Option<&'a str>,
    /// Zero-based column index
    pub index: usize,
    /// Decoded cell value
    pub value: CellValue,
}

/// Header-transform hook; returning `None` removes the column from every row
pub type HeaderHook = Box<dyn Fn(HeaderContext<'_>) -> Option<String>>;

/// Value-transform hook applied to each data-row cell
pub type ValueHook = Box<dyn Fn(ValueContext<'_>) -> CellValue>;

/// Parser output events, delivered in arrival order
///
/// A stream produces at most one `Headers` event before any `Row`, then zero
/// or more `Row` events interleaved with per-row `Error` events, and exactly
/// one `End` once the input is flushed.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Resolved header names (dropped columns excluded), emitted once
    Headers(Vec<String>),
    /// One materialized record
    Row(Record),
    /// A per-row failure; the stream continues past it
    Error(CsvError),
    /// End of input
    End,
}
