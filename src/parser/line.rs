//! Line parsing: comment and skip handling, cell splitting, header resolution

use std::collections::VecDeque;

use crate::error::CsvError;
use crate::options::{HeaderMode, ResolvedOptions};
use crate::parser::{cell, record};
use crate::parser::record::HeaderState;
use crate::types::{CellValue, Event, HeaderContext, ValueContext};

/// Per-stream line state: the running line count and the resolved headers.
pub(crate) struct LineHandler {
    line_number: u64,
    headers: HeaderState,
}

impl LineHandler {
    pub fn new(opts: &ResolvedOptions) -> Self {
        let headers = match &opts.headers {
            HeaderMode::FirstLine => HeaderState::Pending,
            HeaderMode::Disabled => HeaderState::Positional,
            HeaderMode::Provided(names) => {
                HeaderState::Resolved(names.iter().cloned().map(Some).collect())
            }
        };
        LineHandler {
            line_number: 0,
            headers,
        }
    }

    /// Lines handled so far; comment lines are not counted.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Process one complete line (terminator already trimmed) and queue the
    /// resulting events.
    pub fn handle(&mut self, opts: &ResolvedOptions, line: &[u8], out: &mut VecDeque<Event>) {
        if let Some(marker) = opts.comment {
            if line.first() == Some(&marker) {
                return;
            }
        }

        let skip = opts.skip_lines > self.line_number;
        self.line_number += 1;
        if skip {
            return;
        }

        let cells = split_cells(opts, line);

        if let HeaderState::Pending = self.headers {
            let mut resolved = Vec::with_capacity(cells.len());
            for (index, cell) in cells.into_iter().enumerate() {
                let name = cell.into_text();
                let mapped = match &opts.map_headers {
                    Some(hook) => hook(HeaderContext {
                        header: &name,
                        index,
                    }),
                    None => Some(name),
                };
                resolved.push(mapped);
            }
            out.push_back(Event::Headers(
                resolved.iter().flatten().cloned().collect(),
            ));
            self.headers = HeaderState::Resolved(resolved);
            return;
        }

        let headers = &self.headers;
        let cells: Vec<CellValue> = cells
            .into_iter()
            .enumerate()
            .map(|(index, value)| match &opts.map_values {
                Some(hook) => hook(ValueContext {
                    header: headers.name_at(index),
                    index,
                    value,
                }),
                None => value,
            })
            .collect();

        if opts.strict {
            if let Some(expected) = headers.len() {
                if cells.len() != expected {
                    out.push_back(Event::Error(CsvError::RowShapeMismatch {
                        line: self.line_number,
                        expected,
                        got: cells.len(),
                    }));
                    return;
                }
            }
        }

        out.push_back(Event::Row(record::materialize(headers, cells)));
    }
}

/// Split a line into decoded cells, honoring quote and escape structure.
///
/// Mirrors the scanner's quote logic locally, with one extra rule: a quote
/// inside a quoted cell only closes it when the next byte is the separator.
/// That is what tells an escaped quote apart from a closing one.
fn split_cells(opts: &ResolvedOptions, line: &[u8]) -> Vec<CellValue> {
    let end = line.len();
    let mut cells = Vec::new();
    let mut quoted = false;
    let mut offset = 0;
    let mut i = 0;

    while i < end {
        let b = line[i];
        let starting_quote = !quoted && b == opts.quote;
        let ending_quote =
            quoted && b == opts.quote && i + 1 < end && line[i + 1] == opts.separator;
        let escape_pair =
            quoted && b == opts.escape && i + 1 < end && line[i + 1] == opts.quote;

        if starting_quote || ending_quote {
            quoted = !quoted;
            i += 1;
            continue;
        }
        if escape_pair {
            i += 2;
            continue;
        }

        if b == opts.separator && !quoted {
            cells.push(cell::decode(opts, &line[offset..i]));
            offset = i + 1;
        }
        i += 1;
    }

    if offset < end {
        cells.push(cell::decode(opts, &line[offset..end]));
    }

    // A line ending exactly on the separator carries one more empty cell.
    if line.last() == Some(&opts.separator) {
        cells.push(cell::decode(opts, b""));
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    fn opts() -> ResolvedOptions {
        ParserOptions::new().resolve().unwrap()
    }

    fn texts(cells: Vec<CellValue>) -> Vec<String> {
        cells.into_iter().map(|c| c.into_text()).collect()
    }

    #[test]
    fn test_split_simple() {
        assert_eq!(texts(split_cells(&opts(), b"a,b,c")), vec!["a", "b", "c"]);
        assert_eq!(texts(split_cells(&opts(), b"a,,c")), vec!["a", "", "c"]);
    }

    #[test]
    fn test_split_quoted_separator() {
        assert_eq!(texts(split_cells(&opts(), b"\"a,b\",c")), vec!["a,b", "c"]);
    }

    #[test]
    fn test_split_escaped_quote() {
        assert_eq!(
            texts(split_cells(&opts(), b"\"Say \"\"Hi\"\",ok\",x")),
            vec!["Say \"Hi\",ok", "x"]
        );
    }

    #[test]
    fn test_trailing_separator_adds_empty_cell() {
        assert_eq!(texts(split_cells(&opts(), b"a,b,")), vec!["a", "b", ""]);
        assert_eq!(texts(split_cells(&opts(), b",")), vec!["", ""]);
    }

    #[test]
    fn test_empty_line_has_no_cells() {
        assert!(split_cells(&opts(), b"").is_empty());
    }

    #[test]
    fn test_quoted_final_cell() {
        assert_eq!(texts(split_cells(&opts(), b"a,\"b\"")), vec!["a", "b"]);
    }

    #[test]
    fn test_comment_line_discarded_without_counting() {
        let opts = ParserOptions::new()
            .skip_comments(true)
            .no_headers()
            .resolve()
            .unwrap();
        let mut handler = LineHandler::new(&opts);
        let mut out = VecDeque::new();

        handler.handle(&opts, b"# a comment", &mut out);
        assert!(out.is_empty());
        assert_eq!(handler.line_number(), 0);

        handler.handle(&opts, b"a,b", &mut out);
        assert_eq!(handler.line_number(), 1);
        assert!(matches!(out.pop_front(), Some(Event::Row(_))));
    }

    #[test]
    fn test_skip_lines_consume_before_headers() {
        let opts = ParserOptions::new().skip_lines(1).resolve().unwrap();
        let mut handler = LineHandler::new(&opts);
        let mut out = VecDeque::new();

        handler.handle(&opts, b"garbage preamble", &mut out);
        assert!(out.is_empty());

        handler.handle(&opts, b"NAME,AGE", &mut out);
        assert_eq!(
            out.pop_front(),
            Some(Event::Headers(vec!["NAME".to_string(), "AGE".to_string()]))
        );
    }

    #[test]
    fn test_strict_mismatch_reported_per_row() {
        let opts = ParserOptions::new().strict(true).resolve().unwrap();
        let mut handler = LineHandler::new(&opts);
        let mut out = VecDeque::new();

        handler.handle(&opts, b"a,b", &mut out);
        out.clear();

        handler.handle(&opts, b"1,2,3", &mut out);
        assert_eq!(
            out.pop_front(),
            Some(Event::Error(CsvError::RowShapeMismatch {
                line: 2,
                expected: 2,
                got: 3,
            }))
        );

        // The stream keeps going after the bad row.
        handler.handle(&opts, b"1,2", &mut out);
        assert!(matches!(out.pop_front(), Some(Event::Row(_))));
    }
}
