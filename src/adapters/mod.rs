// Adapters layer: concrete readers and writers for the external formats
// (spreadsheets in, Word documents out). The domain never sees bytes.

pub mod docx;
pub mod spreadsheet;
pub mod xml;
