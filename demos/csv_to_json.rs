//! Convert a CSV file or URL to a JSON array of records.
//!
//! Run with: cargo run --example csv_to_json --features serde -- data.csv
//! URL input additionally needs --features remote.

use csvstream::{csv_to_records, ParserOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let location = std::env::args()
        .nth(1)
        .ok_or("usage: csv_to_json <file.csv | url>")?;

    let records = csv_to_records(&location, ParserOptions::new())?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
