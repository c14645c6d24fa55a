use crate::declension::{DativeName, Gender};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PROOFREAD_ADVISORY: &str =
    "Converted from nominative using heuristic rules. Please proofread.";

/// One row of the name list, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub index: usize,
    pub nominative: String,
}

/// A recipient ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub recipient: Recipient,
    pub declined: DativeName,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One document per recipient.
    #[default]
    Separate,
    /// Per-recipient documents plus one merged document.
    Single,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub nominative: String,
    pub dative: String,
    pub gender: Gender,
    pub file: String,
}

/// Proofreading list written next to the generated documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub template: String,
    pub source: String,
    pub advisory: String,
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(template: &str, source: &str, certificates: &[Certificate]) -> Self {
        Self {
            generated_at: Utc::now(),
            template: template.to_string(),
            source: source.to_string(),
            advisory: PROOFREAD_ADVISORY.to_string(),
            entries: certificates
                .iter()
                .map(|c| ManifestEntry {
                    index: c.recipient.index,
                    nominative: c.recipient.nominative.clone(),
                    dative: c.declined.dative.clone(),
                    gender: c.declined.gender,
                    file: c.file_name.clone(),
                })
                .collect(),
        }
    }
}
