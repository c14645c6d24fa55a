//! Splitting a raw full name into surname, given name and patronymic.

use serde::{Deserialize, Serialize};

/// A nominative full name as it appears in the spreadsheet.
///
/// Ordering is always surname, given name, patronymic. A single token is a
/// given name; two tokens are surname and given name; anything after the
/// third token is dropped and only counted in `discarded`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName {
    pub surname: Option<String>,
    pub given_name: Option<String>,
    pub patronymic: Option<String>,
    #[serde(skip_serializing_if = "is_zero", default)]
    pub discarded: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl FullName {
    /// Parses whitespace-delimited tokens. Never fails.
    pub fn parse(raw: &str) -> Self {
        let tokens: Vec<&str> = raw.split_whitespace().collect();

        match tokens.as_slice() {
            [] => Self::default(),
            [given] => Self {
                given_name: Some((*given).to_string()),
                ..Self::default()
            },
            [surname, given] => Self {
                surname: Some((*surname).to_string()),
                given_name: Some((*given).to_string()),
                ..Self::default()
            },
            [surname, given, patronymic, rest @ ..] => Self {
                surname: Some((*surname).to_string()),
                given_name: Some((*given).to_string()),
                patronymic: Some((*patronymic).to_string()),
                discarded: rest.len(),
            },
        }
    }

    /// Label used for output file names: surname, else given name.
    pub fn label(&self) -> Option<&str> {
        self.surname.as_deref().or(self.given_name.as_deref())
    }
}
