//! Parse a CSV file given on the command line and print each record.
//!
//! Run with: cargo run --example basic_parse -- data.csv

use csvstream::{CsvReader, ParserOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: basic_parse <file.csv>")?;

    let mut reader = CsvReader::open_with(&path, ParserOptions::new().skip_comments(true))?;

    let mut count = 0usize;
    for record in reader.records() {
        let record = record?;
        println!("{:?}", record);
        count += 1;
    }

    if let Some(headers) = reader.headers() {
        println!("columns: {:?}", headers);
    }
    println!("{} records", count);
    Ok(())
}
