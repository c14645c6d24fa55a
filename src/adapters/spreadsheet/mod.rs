//! Name sources: the first column of a workbook or CSV file.

pub mod delimited;
pub mod xlsx;

use crate::utils::error::{MedalError, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Xlsx,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx") => Ok(SourceFormat::Xlsx),
            Some("csv") => Ok(SourceFormat::Csv),
            _ => Err(MedalError::spreadsheet(format!(
                "unsupported name list '{}': expected .xlsx or .csv",
                path
            ))),
        }
    }
}

/// Reads non-empty, trimmed first-column values. `sheet` only applies to
/// workbooks.
pub fn read_names(format: SourceFormat, bytes: &[u8], sheet: Option<&str>) -> Result<Vec<String>> {
    match format {
        SourceFormat::Xlsx => xlsx::read_names(bytes, sheet),
        SourceFormat::Csv => {
            if let Some(sheet) = sheet {
                tracing::warn!("Ignoring sheet '{}' for a CSV name list", sheet);
            }
            delimited::read_names(bytes)
        }
    }
}
