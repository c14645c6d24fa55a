//! Dative inflection of a single name part.

use super::gender::Gender;
use super::rules::{apply, GIVEN_NAME_RULES, PATRONYMIC_RULES, SURNAME_RULES};

/// Only a hard consonant ending is gender-sensitive: masculine takes "-у",
/// anything else "-ові". A soft sign always takes "-ові".
pub fn dative_given_name(word: &str, gender: Gender) -> String {
    apply(GIVEN_NAME_RULES, word.trim(), gender)
}

pub fn dative_surname(word: &str, gender: Gender) -> String {
    apply(SURNAME_RULES, word.trim(), gender)
}

/// Known patronymic endings win over `gender`; the gender only decides
/// words with an unrecognized ending.
pub fn dative_patronymic(word: &str, gender: Gender) -> String {
    apply(PATRONYMIC_RULES, word.trim(), gender)
}
