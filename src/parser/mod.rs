//! Streaming CSV parser core
//!
//! [`CsvParser`] consumes byte chunks in arrival order and turns them into an
//! ordered queue of [`Event`]s. Chunks may split anywhere - mid-field,
//! mid-quote, even inside a multi-byte UTF-8 character - and the parser
//! carries its state across the boundary instead of re-scanning consumed
//! bytes. Feeding the same input as one chunk or as many produces identical
//! events.
//!
//! # Examples
//!
//! ```
//! use csvstream::{CsvParser, Event, ParserOptions};
//!
//! let mut parser = CsvParser::new(ParserOptions::new()).unwrap();
//! parser.push(b"NAME,AGE\nDaffy ").unwrap();
//! parser.push(b"Duck,24\n").unwrap();
//! parser.finish().unwrap();
//!
//! let events: Vec<Event> = parser.events().collect();
//! assert_eq!(events.len(), 3); // headers, one row, end
//! ```

mod cell;
mod line;
mod record;

use std::collections::VecDeque;

use crate::error::{CsvError, Result};
use crate::options::{ParserOptions, ResolvedOptions};
use crate::types::Event;
use line::LineHandler;

/// Push-based streaming parser for delimiter-separated text
///
/// One instance per stream. Chunks must be delivered in order from a single
/// thread; independent streams get independent parsers.
pub struct CsvParser {
    opts: ResolvedOptions,
    /// Bytes of the current unfinished line, compacted so the line starts
    /// at index 0 between pushes
    buf: Vec<u8>,
    /// Resume point for scanning within `buf`
    scan_pos: usize,
    /// Start of the current line within `buf`
    line_start: usize,
    /// Inside a quoted field
    quoted: bool,
    /// A lone escape byte was seen; the next byte decides what it was
    pending_escape: bool,
    /// No line terminator has been recognized yet (auto-detection window)
    first_line: bool,
    /// Effective line terminator byte
    newline: u8,
    lines: LineHandler,
    events: VecDeque<Event>,
    /// Set after a fatal error or `finish()`; further input is rejected
    done: bool,
}

impl CsvParser {
    /// Create a parser, validating the options eagerly.
    pub fn new(options: ParserOptions) -> Result<Self> {
        let opts = options.resolve()?;
        let newline = opts.newline;
        let lines = LineHandler::new(&opts);
        Ok(CsvParser {
            opts,
            buf: Vec::new(),
            scan_pos: 0,
            line_start: 0,
            quoted: false,
            pending_escape: false,
            first_line: true,
            newline,
            lines,
            events: VecDeque::new(),
            done: false,
        })
    }

    /// Feed one chunk of input.
    ///
    /// Completed lines are parsed immediately and their events queued; an
    /// unterminated trailing line is retained for the next chunk. Returns a
    /// fatal error if a row exceeds the configured byte limit, after which
    /// the parser accepts no more input.
    pub fn push(&mut self, chunk: &[u8]) -> Result<()> {
        if self.done {
            return Err(CsvError::ReadError(
                "parser already finished".to_string(),
            ));
        }
        self.buf.extend_from_slice(chunk);
        self.scan(false)?;
        self.compact();
        Ok(())
    }

    /// Signal end of input.
    ///
    /// Any retained partial line is flushed through the same pipeline as if
    /// it were newline-terminated, and an [`Event::End`] is queued. Calling
    /// `finish` again is a no-op.
    pub fn finish(&mut self) -> Result<()> {
        if self.done {
            return Ok(());
        }
        self.scan(true)?;

        if self.pending_escape {
            self.pending_escape = false;
            if self.opts.escape == self.opts.quote {
                // The held byte was an ordinary quote after all.
                self.quoted = !self.quoted;
            } else {
                // A dangling escape byte cannot be resolved; report it
                // rather than dropping the tail silently.
                self.done = true;
                return Err(CsvError::TrailingEscape);
            }
        }

        if self.line_start < self.buf.len() {
            let mut line = &self.buf[self.line_start..];
            if !self.opts.custom_newline && line.last() == Some(&b'\r') {
                line = &line[..line.len() - 1];
            }
            self.lines.handle(&self.opts, line, &mut self.events);
        }

        self.buf.clear();
        self.scan_pos = 0;
        self.line_start = 0;
        self.done = true;
        self.events.push_back(Event::End);
        Ok(())
    }

    /// Remove and return the next queued event.
    pub fn poll_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Drain all currently queued events.
    pub fn events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..)
    }

    /// Number of queued events.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Bytes currently retained for the unfinished line.
    pub fn buffered_bytes(&self) -> usize {
        self.buf.len()
    }

    /// Scan from the resume point, parsing each completed line.
    ///
    /// With `at_end` set there is no next chunk, so byte classifications
    /// that would otherwise wait for one more byte resolve immediately.
    fn scan(&mut self, at_end: bool) -> Result<()> {
        let quote = self.opts.quote;
        let escape = self.opts.escape;
        let mut i = self.scan_pos;

        while i < self.buf.len() {
            let b = self.buf[i];

            if i - self.line_start + 1 > self.opts.max_row_bytes {
                self.done = true;
                return Err(CsvError::RowTooLarge {
                    line: self.lines.line_number() + 1,
                    limit: self.opts.max_row_bytes,
                });
            }

            if self.pending_escape {
                self.pending_escape = false;
                if b == quote {
                    // Escape + quote pair: a literal quote, collapsed later
                    // by the cell decoder.
                    i += 1;
                    continue;
                }
                if escape == quote {
                    // Not an escape: the held byte was a quote toggle.
                    self.quoted = !self.quoted;
                }
                // Otherwise the held escape byte was plain data; fall
                // through and process the current byte normally.
            }

            if b == escape {
                self.pending_escape = true;
                i += 1;
                continue;
            }
            if b == quote {
                self.quoted = !self.quoted;
                i += 1;
                continue;
            }

            if !self.quoted {
                if self.first_line && !self.opts.custom_newline && b == b'\r' {
                    match self.buf.get(i + 1) {
                        // CR followed by LF: terminator stays \n, the CR is
                        // trimmed per-line.
                        Some(&b'\n') => {}
                        Some(_) => self.newline = b'\r',
                        None if at_end => self.newline = b'\r',
                        // Cannot classify the CR until the next chunk.
                        None => break,
                    }
                }

                if b == self.newline {
                    let mut line = &self.buf[self.line_start..i];
                    if !self.opts.custom_newline && line.last() == Some(&b'\r') {
                        line = &line[..line.len() - 1];
                    }
                    self.lines.handle(&self.opts, line, &mut self.events);
                    self.line_start = i + 1;
                    self.first_line = false;
                }
            }

            i += 1;
        }

        self.scan_pos = i;
        Ok(())
    }

    /// Hand the consumed prefix back; the retained suffix keeps exclusive
    /// ownership of the pending line.
    fn compact(&mut self) {
        if self.line_start == 0 {
            return;
        }
        let consumed = self.line_start;
        self.buf.drain(..consumed);
        self.scan_pos -= consumed;
        self.line_start = 0;
    }
}
