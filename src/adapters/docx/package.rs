use crate::utils::error::{MedalError, Result};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// An OOXML package held in memory, entries kept in archive order.
#[derive(Debug, Clone, Default)]
pub struct Package {
    entries: Vec<(String, Vec<u8>)>,
}

impl Package {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push((name, data));
        }

        Ok(Self { entries })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, data) in &self.entries {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(data)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, data)| data.as_slice())
    }

    pub fn require_part(&self, name: &str) -> Result<&[u8]> {
        self.part(name)
            .ok_or_else(|| MedalError::template(format!("package has no '{}' part", name)))
    }

    /// Replaces an existing part or appends a new one.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.entries.iter_mut().find(|(entry, _)| entry == name) {
            Some((_, existing)) => *existing = data,
            None => self.entries.push((name.to_string(), data)),
        }
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Body, header and footer parts: the ones that can carry placeholders.
    pub fn text_part_names(&self) -> Vec<String> {
        self.part_names()
            .filter(|name| is_text_part(name))
            .map(str::to_string)
            .collect()
    }
}

fn is_text_part(name: &str) -> bool {
    if name == DOCUMENT_PART {
        return true;
    }
    let Some(file) = name.strip_prefix("word/") else {
        return false;
    };
    !file.contains('/')
        && file.ends_with(".xml")
        && (file.starts_with("header") || file.starts_with("footer"))
}

/// `word/header1.xml` -> `word/_rels/header1.xml.rels`
pub fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}
