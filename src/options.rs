//! Parser configuration
//!
//! All options are set through the [`ParserOptions`] builder and resolved
//! once at parser construction. Contradictory combinations are rejected
//! eagerly, before any input is parsed.

use crate::error::{CsvError, Result};
use crate::types::{HeaderHook, ValueHook};

/// How column headers are determined
#[derive(Debug)]
pub(crate) enum HeaderMode {
    /// Derive headers from the first retained line (default)
    FirstLine,
    /// Use the supplied names; the first line is treated as data
    Provided(Vec<String>),
    /// No headers; columns are keyed by position
    Disabled,
}

/// Builder for parser options
///
/// # Examples
///
/// ```
/// use csvstream::ParserOptions;
///
/// let options = ParserOptions::new()
///     .separator(b';')
///     .skip_comments(true)
///     .skip_lines(2);
/// ```
pub struct ParserOptions {
    separator: u8,
    quote: u8,
    escape: Option<u8>,
    newline: Option<u8>,
    headers: HeaderMode,
    map_headers: Option<HeaderHook>,
    map_values: Option<ValueHook>,
    raw: bool,
    comment: Option<u8>,
    skip_lines: u64,
    max_row_bytes: usize,
    strict: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            separator: b',',
            quote: b'"',
            escape: None,
            newline: None,
            headers: HeaderMode::FirstLine,
            map_headers: None,
            map_values: None,
            raw: false,
            comment: None,
            skip_lines: 0,
            max_row_bytes: usize::MAX,
            strict: false,
        }
    }
}

impl ParserOptions {
    /// Create options with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column separator byte (default `,`)
    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Set the quote byte (default `"`)
    pub fn quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Set the escape byte (defaults to the quote byte)
    pub fn escape(mut self, escape: u8) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Set a fixed line terminator byte, disabling auto-detection
    pub fn newline(mut self, newline: u8) -> Self {
        self.newline = Some(newline);
        self
    }

    /// Supply explicit header names; the first line is then parsed as data
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = HeaderMode::Provided(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Disable headers entirely; records are keyed by column index
    ///
    /// Strict column-count enforcement is meaningless without headers and
    /// is forced off.
    pub fn no_headers(mut self) -> Self {
        self.headers = HeaderMode::Disabled;
        self
    }

    /// Install a header-transform hook
    ///
    /// The hook runs once per derived header cell. Returning `None` removes
    /// that column from every subsequent row. Explicitly supplied header
    /// lists bypass the hook.
    pub fn map_headers<F>(mut self, hook: F) -> Self
    where
        F: Fn(crate::types::HeaderContext<'_>) -> Option<String> + 'static,
    {
        self.map_headers = Some(Box::new(hook));
        self
    }

    /// Install a value-transform hook, applied to each data-row cell
    pub fn map_values<F>(mut self, hook: F) -> Self
    where
        F: Fn(crate::types::ValueContext<'_>) -> crate::types::CellValue + 'static,
    {
        self.map_values = Some(Box::new(hook));
        self
    }

    /// Deliver cell values as raw bytes instead of decoded text
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Skip lines whose first byte is `#`
    pub fn skip_comments(mut self, skip: bool) -> Self {
        self.comment = if skip { Some(b'#') } else { None };
        self
    }

    /// Skip lines starting with a custom comment marker
    ///
    /// Only the first byte of the marker is significant.
    pub fn comment_marker(mut self, marker: &str) -> Self {
        self.comment = marker.bytes().next();
        self
    }

    /// Discard the first `count` non-comment lines before header detection
    pub fn skip_lines(mut self, count: u64) -> Self {
        self.skip_lines = count;
        self
    }

    /// Maximum bytes allowed in a single row; exceeding it is fatal
    pub fn max_row_bytes(mut self, limit: usize) -> Self {
        self.max_row_bytes = limit;
        self
    }

    /// Require every row's cell count to match the header count
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate and freeze the options
    pub(crate) fn resolve(self) -> Result<ResolvedOptions> {
        let escape = self.escape.unwrap_or(self.quote);
        let newline = self.newline.unwrap_or(b'\n');

        if self.separator == self.quote {
            return Err(CsvError::InvalidConfig(
                "separator and quote must differ".to_string(),
            ));
        }
        if self.separator == newline {
            return Err(CsvError::InvalidConfig(
                "separator and newline must differ".to_string(),
            ));
        }
        if self.quote == newline {
            return Err(CsvError::InvalidConfig(
                "quote and newline must differ".to_string(),
            ));
        }

        // Strict column counting needs a header count to compare against.
        let strict = match self.headers {
            HeaderMode::Disabled => false,
            _ => self.strict,
        };

        Ok(ResolvedOptions {
            separator: self.separator,
            quote: self.quote,
            escape,
            newline,
            custom_newline: self.newline.is_some(),
            headers: self.headers,
            map_headers: self.map_headers,
            map_values: self.map_values,
            raw: self.raw,
            comment: self.comment,
            skip_lines: self.skip_lines,
            max_row_bytes: self.max_row_bytes,
            strict,
        })
    }
}

/// Options after eager validation, immutable for the stream's lifetime
pub(crate) struct ResolvedOptions {
    pub separator: u8,
    pub quote: u8,
    pub escape: u8,
    pub newline: u8,
    pub custom_newline: bool,
    pub headers: HeaderMode,
    pub map_headers: Option<HeaderHook>,
    pub map_values: Option<ValueHook>,
    pub raw: bool,
    pub comment: Option<u8>,
    pub skip_lines: u64,
    pub max_row_bytes: usize,
    pub strict: bool,
}

impl std::fmt::Debug for ResolvedOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedOptions")
            .field("separator", &self.separator)
            .field("quote", &self.quote)
            .field("escape", &self.escape)
            .field("newline", &self.newline)
            .field("custom_newline", &self.custom_newline)
            .field("headers", &self.headers)
            .field("map_headers", &self.map_headers.is_some())
            .field("map_values", &self.map_values.is_some())
            .field("raw", &self.raw)
            .field("comment", &self.comment)
            .field("skip_lines", &self.skip_lines)
            .field("max_row_bytes", &self.max_row_bytes)
            .field("strict", &self.strict)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ParserOptions::new().resolve().unwrap();
        assert_eq!(opts.separator, b',');
        assert_eq!(opts.quote, b'"');
        assert_eq!(opts.escape, b'"');
        assert_eq!(opts.newline, b'\n');
        assert!(!opts.custom_newline);
        assert_eq!(opts.max_row_bytes, usize::MAX);
        assert!(!opts.strict);
    }

    #[test]
    fn test_escape_defaults_to_quote() {
        let opts = ParserOptions::new().quote(b'\'').resolve().unwrap();
        assert_eq!(opts.escape, b'\'');

        let opts = ParserOptions::new().escape(b'\\').resolve().unwrap();
        assert_eq!(opts.quote, b'"');
        assert_eq!(opts.escape, b'\\');
    }

    #[test]
    fn test_separator_quote_conflict() {
        let err = ParserOptions::new().separator(b'"').resolve().unwrap_err();
        assert!(matches!(err, CsvError::InvalidConfig(_)));
    }

    #[test]
    fn test_separator_newline_conflict() {
        let err = ParserOptions::new()
            .separator(b'|')
            .newline(b'|')
            .resolve()
            .unwrap_err();
        assert!(matches!(err, CsvError::InvalidConfig(_)));
    }

    #[test]
    fn test_strict_forced_off_without_headers() {
        let opts = ParserOptions::new()
            .no_headers()
            .strict(true)
            .resolve()
            .unwrap();
        assert!(!opts.strict);
    }

    #[test]
    fn test_comment_marker_first_byte() {
        let opts = ParserOptions::new().comment_marker("//").resolve().unwrap();
        assert_eq!(opts.comment, Some(b'/'));

        let opts = ParserOptions::new().skip_comments(true).resolve().unwrap();
        assert_eq!(opts.comment, Some(b'#'));
    }
}
