//! Gender inference from patronymic endings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Masculine patronymic endings, in match order.
pub const MASCULINE_PATRONYMIC_SUFFIXES: &[&str] = &["ович", "йович", "евич", "льович", "євич"];

/// Feminine patronymic endings, in match order.
pub const FEMININE_PATRONYMIC_SUFFIXES: &[&str] = &["івна", "ївна", "евна", "євна"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Unknown,
    Masculine,
    Feminine,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Unknown => "unknown",
            Gender::Masculine => "masculine",
            Gender::Feminine => "feminine",
        };
        f.write_str(label)
    }
}

/// Returns the first suffix from `suffixes` that `lowered` ends with.
pub(crate) fn ends_with_any<'a>(lowered: &str, suffixes: &[&'a str]) -> Option<&'a str> {
    suffixes.iter().copied().find(|suffix| lowered.ends_with(suffix))
}

/// Guesses gender from a patronymic. Masculine endings are checked first.
pub fn infer_gender(patronymic: Option<&str>) -> Gender {
    let Some(patronymic) = patronymic.map(str::trim).filter(|p| !p.is_empty()) else {
        return Gender::Unknown;
    };

    let lowered = patronymic.to_lowercase();
    if ends_with_any(&lowered, MASCULINE_PATRONYMIC_SUFFIXES).is_some() {
        Gender::Masculine
    } else if ends_with_any(&lowered, FEMININE_PATRONYMIC_SUFFIXES).is_some() {
        Gender::Feminine
    } else {
        Gender::Unknown
    }
}
