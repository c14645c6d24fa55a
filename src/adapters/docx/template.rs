use super::package::{Package, DOCUMENT_PART};
use super::replace::{replace_in_part, Replacements};
use crate::adapters::xml;
use crate::utils::error::Result;

/// A certificate template loaded once and rendered per recipient.
#[derive(Debug, Clone)]
pub struct DocxTemplate {
    package: Package,
    text_parts: Vec<String>,
}

/// One rendered document and how many paragraphs received the name.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub paragraphs_changed: usize,
}

impl DocxTemplate {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let package = Package::from_bytes(bytes)?;
        let document = package.require_part(DOCUMENT_PART)?;
        xml::parse(DOCUMENT_PART, xml::part_str(DOCUMENT_PART, document)?)?;

        let text_parts = package.text_part_names();
        tracing::debug!("Template text parts: {}", text_parts.join(", "));

        Ok(Self {
            package,
            text_parts,
        })
    }

    pub fn text_parts(&self) -> &[String] {
        &self.text_parts
    }

    /// Substitutes placeholders in the body, headers and footers.
    pub fn render(&self, replacements: &Replacements) -> Result<RenderedDocument> {
        let mut package = self.package.clone();
        let mut paragraphs_changed = 0;

        for part in &self.text_parts {
            let Some(bytes) = self.package.part(part) else {
                continue;
            };
            let source = xml::part_str(part, bytes)?;
            if let Some(result) = replace_in_part(part, source, replacements)? {
                paragraphs_changed += result.paragraphs_changed;
                package.set_part(part, result.xml.into_bytes());
            }
        }

        Ok(RenderedDocument {
            bytes: package.to_bytes()?,
            paragraphs_changed,
        })
    }
}
