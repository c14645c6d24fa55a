//! DOCX certificate templates: placeholder substitution and merging.

pub mod merge;
pub mod package;
pub mod replace;
pub mod template;

pub use merge::merge_documents;
pub use package::Package;
pub use replace::{Placeholders, Replacements};
pub use template::{DocxTemplate, RenderedDocument};
