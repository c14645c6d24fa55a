//! First-column reader for `.csv` name lists.

use crate::utils::error::Result;
use csv::ReaderBuilder;

/// No header row; rows may have any number of fields.
pub fn read_names(bytes: &[u8]) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(first) = record.get(0) {
            let name = first.trim_start_matches('\u{feff}').trim();
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}
