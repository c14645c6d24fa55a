//! Heuristic dative declension of Ukrainian full names.
//!
//! A name is split into surname, given name and patronymic, gender is guessed
//! from the patronymic, and each part is rewritten by its own suffix table.
//! Everything here is total: unusual input comes back unchanged rather than
//! failing. Results should still be proofread.

pub mod gender;
pub mod inflector;
pub mod rules;
pub mod splitter;

pub use gender::{infer_gender, Gender};
pub use inflector::{dative_given_name, dative_patronymic, dative_surname};
pub use splitter::FullName;

use serde::{Deserialize, Serialize};

/// One declined name together with what the engine inferred on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DativeName {
    pub nominative: FullName,
    pub gender: Gender,
    pub dative: String,
}

/// Declines a full name, keeping the intermediate split and gender.
pub fn decline(full_name: &str) -> DativeName {
    let nominative = FullName::parse(full_name);
    let gender = infer_gender(nominative.patronymic.as_deref());

    let parts = [
        nominative
            .surname
            .as_deref()
            .map(|s| dative_surname(s, gender)),
        nominative
            .given_name
            .as_deref()
            .map(|n| dative_given_name(n, gender)),
        nominative
            .patronymic
            .as_deref()
            .map(|p| dative_patronymic(p, gender)),
    ];

    let dative = parts.into_iter().flatten().collect::<Vec<_>>().join(" ");

    DativeName {
        nominative,
        gender,
        dative,
    }
}

/// Nominative full name in, dative full name out.
pub fn inflect_to_dative(full_name: &str) -> String {
    decline(full_name).dative
}
