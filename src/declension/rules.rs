//! Ordered suffix-rule tables for the dative case.
//!
//! Each word class (surname, given name, patronymic) owns one table. A table
//! is scanned top to bottom and the first rule whose ending and gender guard
//! both match rewrites the word. Words no rule matches are returned as is.

use super::gender::{Gender, FEMININE_PATRONYMIC_SUFFIXES, MASCULINE_PATRONYMIC_SUFFIXES};

/// Ukrainian vowels. Any other final character counts as a consonant.
pub const VOWELS: &[char] = &['а', 'е', 'є', 'и', 'і', 'ї', 'о', 'у', 'ю', 'я'];

pub fn is_vowel(ch: char) -> bool {
    ch.to_lowercase().any(|lower| VOWELS.contains(&lower))
}

/// What the end of a (lowercased) word must look like for a rule to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Suffix(&'static str),
    AnyOf(&'static [&'static str]),
    /// Last character is not a vowel; covers "ь", "й", digits and Latin.
    Consonant,
    /// Last character is a letter other than a vowel or the soft sign.
    HardConsonant,
}

impl Ending {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Ending::Suffix(suffix) => lowered.ends_with(suffix),
            Ending::AnyOf(suffixes) => suffixes.iter().any(|suffix| lowered.ends_with(suffix)),
            Ending::Consonant => lowered.chars().last().is_some_and(|ch| !is_vowel(ch)),
            Ending::HardConsonant => lowered
                .chars()
                .last()
                .is_some_and(|ch| ch.is_alphabetic() && ch != 'ь' && !is_vowel(ch)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderGuard {
    Any,
    Only(Gender),
    Not(Gender),
}

impl GenderGuard {
    fn admits(&self, gender: Gender) -> bool {
        match self {
            GenderGuard::Any => true,
            GenderGuard::Only(expected) => gender == *expected,
            GenderGuard::Not(excluded) => gender != *excluded,
        }
    }
}

/// Drop `drop` trailing characters, then append `append`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewrite {
    pub drop: usize,
    pub append: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflectionRule {
    pub ending: Ending,
    pub guard: GenderGuard,
    pub rewrite: Rewrite,
}

const fn rule(ending: Ending, drop: usize, append: &'static str) -> InflectionRule {
    InflectionRule {
        ending,
        guard: GenderGuard::Any,
        rewrite: Rewrite { drop, append },
    }
}

const fn guarded(
    ending: Ending,
    guard: GenderGuard,
    drop: usize,
    append: &'static str,
) -> InflectionRule {
    InflectionRule {
        ending,
        guard,
        rewrite: Rewrite { drop, append },
    }
}

// A patronymic-confirmed masculine full name uses the formal "-у" register
// ("Гурову Денису Сергійовичу"); a bare given name takes "-ові".
pub const GIVEN_NAME_RULES: &[InflectionRule] = &[
    rule(Ending::Suffix("а"), 1, "і"),
    rule(Ending::Suffix("я"), 1, "ї"),
    rule(Ending::Suffix("й"), 1, "ю"),
    rule(Ending::Suffix("о"), 1, "ові"),
    guarded(Ending::HardConsonant, GenderGuard::Only(Gender::Masculine), 0, "у"),
    rule(Ending::Consonant, 0, "ові"),
];

// Longest suffix first so "ко" never shadows "енко".
pub const SURNAME_RULES: &[InflectionRule] = &[
    rule(Ending::Suffix("енко"), 1, "у"),
    rule(Ending::Suffix("ко"), 1, "у"),
    rule(Ending::Suffix("о"), 1, "у"),
    rule(Ending::Suffix("а"), 1, "і"),
    rule(Ending::Suffix("я"), 1, "ї"),
    rule(Ending::Suffix("й"), 1, "ю"),
    rule(Ending::Consonant, 0, "у"),
];

pub const PATRONYMIC_RULES: &[InflectionRule] = &[
    rule(Ending::AnyOf(MASCULINE_PATRONYMIC_SUFFIXES), 0, "у"),
    rule(Ending::AnyOf(FEMININE_PATRONYMIC_SUFFIXES), 1, "і"),
    guarded(Ending::Suffix("а"), GenderGuard::Only(Gender::Feminine), 1, "і"),
    guarded(Ending::Suffix("я"), GenderGuard::Only(Gender::Feminine), 1, "ї"),
    guarded(Ending::Consonant, GenderGuard::Not(Gender::Feminine), 0, "у"),
];

/// Finds the first rule in `table` that fires for `word`.
pub fn find_rule<'t>(
    table: &'t [InflectionRule],
    word: &str,
    gender: Gender,
) -> Option<&'t InflectionRule> {
    let lowered = word.to_lowercase();
    table
        .iter()
        .find(|rule| rule.guard.admits(gender) && rule.ending.matches(&lowered))
}

/// Runs `table` over `word`; unmatched words come back unchanged.
pub fn apply(table: &[InflectionRule], word: &str, gender: Gender) -> String {
    match find_rule(table, word, gender) {
        Some(rule) => rewrite(word, rule.rewrite),
        None => word.to_string(),
    }
}

/// The appended tail follows the case of the word's last character: a
/// lowercase last letter keeps the tail lowercase, anything else gets a
/// capitalized tail.
fn rewrite(word: &str, rewrite: Rewrite) -> String {
    let Some(last) = word.chars().last() else {
        return word.to_string();
    };

    let keep = if rewrite.drop == 0 {
        word.len()
    } else {
        word.char_indices()
            .rev()
            .nth(rewrite.drop - 1)
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    };

    let mut out = String::with_capacity(keep + rewrite.append.len());
    out.push_str(&word[..keep]);
    if last.is_lowercase() {
        out.push_str(rewrite.append);
    } else {
        out.push_str(&capitalize(rewrite.append));
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_vowel() {
        assert!(is_vowel('а'));
        assert!(is_vowel('Я'));
        assert!(!is_vowel('ь'));
        assert!(!is_vowel('й'));
        assert!(!is_vowel('n'));
    }

    #[test]
    fn test_rewrite_drop_and_append() {
        let r = Rewrite { drop: 1, append: "і" };
        assert_eq!(rewrite("Тетяна", r), "Тетяні");
        assert_eq!(rewrite("ТЕТЯНА", r), "ТЕТЯНІ");

        let r = Rewrite { drop: 0, append: "ові" };
        assert_eq!(rewrite("Олександр", r), "Олександрові");
        assert_eq!(rewrite("ОЛЕКСАНДР", r), "ОЛЕКСАНДРОві");
    }

    #[test]
    fn test_rewrite_single_char_word() {
        let r = Rewrite { drop: 1, append: "і" };
        assert_eq!(rewrite("а", r), "і");
        assert_eq!(rewrite("", r), "");
    }

    #[test]
    fn test_first_match_wins() {
        let found = find_rule(SURNAME_RULES, "Шевченко", Gender::Unknown).unwrap();
        assert_eq!(found.ending, Ending::Suffix("енко"));

        let found = find_rule(SURNAME_RULES, "Бойко", Gender::Unknown).unwrap();
        assert_eq!(found.ending, Ending::Suffix("ко"));
    }

    #[test]
    fn test_hard_consonant_excludes_soft_sign() {
        assert!(Ending::HardConsonant.matches("денис"));
        assert!(!Ending::HardConsonant.matches("василь"));
        assert!(!Ending::HardConsonant.matches("тетяна"));
        assert!(!Ending::HardConsonant.matches("r2"));
        assert!(Ending::Consonant.matches("василь"));
    }

    #[test]
    fn test_gender_guard() {
        assert!(find_rule(PATRONYMIC_RULES, "Ілліч", Gender::Feminine).is_none());
        assert!(find_rule(PATRONYMIC_RULES, "Ілліч", Gender::Unknown).is_some());
        assert!(find_rule(PATRONYMIC_RULES, "Кузьмінична", Gender::Masculine).is_none());
    }

    #[test]
    fn test_no_rule_returns_word() {
        assert_eq!(apply(GIVEN_NAME_RULES, "Марі", Gender::Unknown), "Марі");
        assert_eq!(apply(SURNAME_RULES, "", Gender::Unknown), "");
    }
}
