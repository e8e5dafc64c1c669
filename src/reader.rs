//! Byte-source collaborators: local files and remote URLs
//!
//! The parser core never performs I/O itself. [`CsvReader`] wraps any
//! ordered byte source implementing [`std::io::Read`], feeds it chunk-wise
//! through a [`CsvParser`], and exposes the resulting events and records.
//!
//! # Examples
//!
//! ```no_run
//! use csvstream::CsvReader;
//!
//! let mut reader = CsvReader::open("data.csv").unwrap();
//! for record in reader.records() {
//!     println!("{:?}", record.unwrap());
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{CsvError, Result};
use crate::options::ParserOptions;
use crate::parser::CsvParser;
use crate::types::{Event, Record};

const CHUNK_SIZE: usize = 8 * 1024;

/// Streaming reader that drives a byte source through the parser
pub struct CsvReader<R: Read> {
    source: R,
    parser: CsvParser,
    chunk: Vec<u8>,
    headers: Option<Vec<String>>,
    pending_err: Option<CsvError>,
    done: bool,
}

impl<R: Read> std::fmt::Debug for CsvReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvReader")
            .field("headers", &self.headers)
            .field("pending_err", &self.pending_err)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl CsvReader<BufReader<File>> {
    /// Open a local CSV file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, ParserOptions::new())
    }

    /// Open a local CSV file with custom options.
    pub fn open_with<P: AsRef<Path>>(path: P, options: ParserOptions) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CsvError::InvalidConfig(
                "path or URL is required".to_string(),
            ));
        }
        let file = File::open(path)
            .map_err(|e| CsvError::ReadError(format!("Failed to open CSV file: {}", e)))?;
        Self::from_reader(BufReader::new(file), options)
    }
}

#[cfg(feature = "remote")]
impl CsvReader<reqwest::blocking::Response> {
    /// Fetch a CSV document over HTTP and stream the response body.
    pub fn open_url(url: &str) -> Result<Self> {
        Self::open_url_with(url, ParserOptions::new())
    }

    /// Fetch a CSV document over HTTP with custom options.
    pub fn open_url_with(url: &str, options: ParserOptions) -> Result<Self> {
        if url.is_empty() {
            return Err(CsvError::InvalidConfig(
                "path or URL is required".to_string(),
            ));
        }
        let response = reqwest::blocking::get(url)
            .map_err(|e| CsvError::ReadError(format!("Failed to fetch URL: {}", e)))?;
        if !response.status().is_success() {
            return Err(CsvError::ReadError(format!(
                "Request failed with status {}",
                response.status()
            )));
        }
        Self::from_reader(response, options)
    }
}

impl CsvReader<Box<dyn Read>> {
    /// Open a local path or an `http(s)` URL, chosen by prefix.
    ///
    /// URL support requires the `remote` feature; without it an `http`
    /// location is rejected up front.
    pub fn open_location(location: &str, options: ParserOptions) -> Result<Self> {
        if location.is_empty() {
            return Err(CsvError::InvalidConfig(
                "path or URL is required".to_string(),
            ));
        }
        if location.starts_with("http") {
            #[cfg(feature = "remote")]
            {
                let response = reqwest::blocking::get(location)
                    .map_err(|e| CsvError::ReadError(format!("Failed to fetch URL: {}", e)))?;
                if !response.status().is_success() {
                    return Err(CsvError::ReadError(format!(
                        "Request failed with status {}",
                        response.status()
                    )));
                }
                return Self::from_reader(Box::new(response), options);
            }
            #[cfg(not(feature = "remote"))]
            {
                return Err(CsvError::InvalidConfig(
                    "URL sources require the `remote` feature".to_string(),
                ));
            }
        }
        let file = File::open(location)
            .map_err(|e| CsvError::ReadError(format!("Failed to open CSV file: {}", e)))?;
        Self::from_reader(Box::new(BufReader::new(file)), options)
    }
}

impl<R: Read> CsvReader<R> {
    /// Wrap an arbitrary byte source.
    pub fn from_reader(source: R, options: ParserOptions) -> Result<Self> {
        Ok(CsvReader {
            source,
            parser: CsvParser::new(options)?,
            chunk: vec![0; CHUNK_SIZE],
            headers: None,
            pending_err: None,
            done: false,
        })
    }

    /// Header names, once the headers event has been observed.
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Pull the next event, reading more input as needed.
    ///
    /// Events queued before a fatal failure are delivered first; the error
    /// follows them, and after that the stream is exhausted.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            if let Some(event) = self.parser.poll_event() {
                if let Event::Headers(names) = &event {
                    self.headers = Some(names.clone());
                }
                return Ok(Some(event));
            }
            if let Some(e) = self.pending_err.take() {
                return Err(e);
            }
            if self.done {
                return Ok(None);
            }

            let n = self
                .source
                .read(&mut self.chunk)
                .map_err(|e| CsvError::ReadError(format!("Failed to read from source: {}", e)))?;
            if n == 0 {
                self.done = true;
                if let Err(e) = self.parser.finish() {
                    self.pending_err = Some(e);
                }
            } else if let Err(e) = self.parser.push(&self.chunk[..n]) {
                self.done = true;
                self.pending_err = Some(e);
            }
        }
    }

    /// Iterate over materialized records.
    ///
    /// Per-row failures surface as `Err` items; iteration may continue past
    /// them or stop, at the caller's choice.
    pub fn records(&mut self) -> RecordIterator<'_, R> {
        RecordIterator { reader: self }
    }
}

/// Iterator over parsed records
pub struct RecordIterator<'a, R: Read> {
    reader: &'a mut CsvReader<R>,
}

impl<R: Read> Iterator for RecordIterator<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.next_event() {
                Ok(Some(Event::Row(record))) => return Some(Ok(record)),
                Ok(Some(Event::Error(e))) => return Some(Err(e)),
                Ok(Some(Event::Headers(_))) => continue,
                Ok(Some(Event::End)) | Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Parse an entire document from a file path or `http(s)` URL into records.
///
/// Stops at the first error; rows parsed before a terminal failure are
/// discarded in favor of the error.
pub fn csv_to_records(location: &str, options: ParserOptions) -> Result<Vec<Record>> {
    let mut reader = CsvReader::open_location(location, options)?;
    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }
    Ok(records)
}
