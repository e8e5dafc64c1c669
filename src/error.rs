//! Error types for csvstream

use thiserror::Error;

/// Result type alias for csvstream operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors reported by the parser and its byte sources
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    /// A single line exceeded the configured row byte limit.
    ///
    /// Fatal for the stream: no partial row is emitted and the parser
    /// rejects further input.
    #[error("row at line {line} exceeds the maximum size of {limit} bytes")]
    RowTooLarge { line: u64, limit: usize },

    /// Strict mode: a row's cell count differs from the header count.
    ///
    /// Reported per offending row; the stream may continue past it.
    #[error("row at line {line} has {got} columns but headers have {expected}")]
    RowShapeMismatch { line: u64, expected: usize, got: usize },

    /// The input ended immediately after an escape byte, leaving the
    /// escape sequence unfinished.
    #[error("input ended inside an escape sequence")]
    TrailingEscape,

    /// Failed to read from the byte source
    #[error("Read error: {0}")]
    ReadError(String),

    /// Invalid or contradictory configuration, rejected before parsing
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
