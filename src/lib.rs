//! # csvstream
//!
//! Streaming CSV parsing with chunk-at-a-time input and keyed record output.
//!
//! The core is a byte-oriented state machine: chunks of any size are pushed
//! in order, parser state (quoting, escaping, partial lines, partial UTF-8
//! sequences) carries across chunk boundaries, and completed rows come out
//! as ordered events. Memory usage is bounded by the longest row, not the
//! document.
//!
//! # Quick Start
//!
//! ```
//! use csvstream::{CsvParser, Event, ParserOptions};
//!
//! let mut parser = CsvParser::new(ParserOptions::new()).unwrap();
//! parser.push(b"NAME,AGE\nDaffy Duck,24\n").unwrap();
//! parser.push(b"Bugs Bunny,22\n").unwrap();
//! parser.finish().unwrap();
//!
//! for event in parser.events() {
//!     match event {
//!         Event::Headers(names) => println!("columns: {:?}", names),
//!         Event::Row(record) => println!("{:?}", record),
//!         Event::Error(e) => eprintln!("bad row: {}", e),
//!         Event::End => break,
//!     }
//! }
//! ```
//!
//! # Reading Files and URLs
//!
//! ```no_run
//! use csvstream::{csv_to_records, CsvReader, ParserOptions};
//!
//! let mut reader = CsvReader::open("data.csv").unwrap();
//! for record in reader.records() {
//!     println!("{:?}", record.unwrap());
//! }
//!
//! // Or collect everything at once; with the `remote` feature this also
//! // accepts http(s) URLs.
//! let records = csv_to_records("data.csv", ParserOptions::new()).unwrap();
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` support for records and cell values
//! - `remote`: HTTP URL sources via a blocking client

pub mod encoder;
pub mod error;
pub mod options;
pub mod parser;
pub mod reader;
pub mod types;

pub use encoder::CsvEncoder;
pub use error::{CsvError, Result};
pub use options::ParserOptions;
pub use parser::CsvParser;
pub use reader::{csv_to_records, CsvReader, RecordIterator};
pub use types::{CellValue, Event, HeaderContext, Record, ValueContext};
