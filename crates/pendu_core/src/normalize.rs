//! Diacritic folding and word masking.
//!
//! All letter and word comparisons go through the normalized form: ASCII,
//! lowercase, accents stripped.

use std::collections::BTreeSet;

use unicode_normalization::UnicodeNormalization;

/// Placeholder shown for an unrevealed letter.
pub const MASK_CHAR: char = '_';

/// Folds a character to its lowercase ASCII base letter.
///
/// `é` becomes `e`, `Ç` becomes `c`. ASCII non-letters pass through
/// unchanged; characters with no ASCII base (e.g. `ж`) yield `None`.
pub fn normalize_character(c: char) -> Option<char> {
    c.to_lowercase()
        .nfd()
        .find(char::is_ascii)
        .map(|base| base.to_ascii_lowercase())
}

/// Folds every character of `word`, dropping those without an ASCII base.
pub fn normalize_word(word: &str) -> String {
    word.chars().filter_map(normalize_character).collect()
}

/// Renders `word` with unfound letters replaced by [`MASK_CHAR`].
///
/// Letters keep their original case and accents once revealed; spaces,
/// hyphens and other non-letters are always shown, so the output has as
/// many characters as `word`.
pub fn mask_word(word: &str, found: &BTreeSet<char>) -> String {
    word.chars()
        .map(|c| {
            if !c.is_alphabetic() {
                return c;
            }
            match normalize_character(c) {
                Some(n) if found.contains(&n) => c,
                _ => MASK_CHAR,
            }
        })
        .collect()
}

/// Every playable letter position of `word`, as `(normalized, original)`.
pub(crate) fn letter_positions(word: &str) -> Vec<(char, char)> {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .filter_map(|c| normalize_character(c).map(|n| (n, c)))
        .filter(|(n, _)| n.is_ascii_lowercase())
        .collect()
}

/// Distinct normalized letters of `word`, in order of first appearance,
/// each paired with its first original spelling.
pub(crate) fn distinct_letters(word: &str) -> Vec<(char, char)> {
    let mut seen = BTreeSet::new();
    letter_positions(word)
        .into_iter()
        .filter(|(n, _)| seen.insert(*n))
        .collect()
}

/// True once every normalized letter of `word` is in `found`.
pub(crate) fn is_complete(word: &str, found: &BTreeSet<char>) -> bool {
    distinct_letters(word)
        .iter()
        .all(|(n, _)| found.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(letters: &str) -> BTreeSet<char> {
        letters.chars().collect()
    }

    #[test]
    fn folds_accents_and_case() {
        assert_eq!(normalize_character('é'), Some('e'));
        assert_eq!(normalize_character('À'), Some('a'));
        assert_eq!(normalize_character('ç'), Some('c'));
        assert_eq!(normalize_character('Z'), Some('z'));
        assert_eq!(normalize_character('-'), Some('-'));
        assert_eq!(normalize_character('7'), Some('7'));
        assert_eq!(normalize_character('ж'), None);
    }

    #[test]
    fn normalizes_whole_words() {
        assert_eq!(normalize_word("Éléphant"), "elephant");
        assert_eq!(normalize_word("arc-en-ciel"), "arc-en-ciel");
        assert_eq!(normalize_word("Noël"), "noel");
    }

    #[test]
    fn mask_hides_everything_before_any_guess() {
        assert_eq!(mask_word("chat", &BTreeSet::new()), "____");
        assert_eq!(mask_word("arc-en-ciel", &BTreeSet::new()), "___-__-____");
    }

    #[test]
    fn mask_reveals_original_spelling() {
        let masked = mask_word("Éléphant", &set("e"));
        assert_eq!(masked, "É_é_____");
        assert_eq!(masked.chars().count(), "Éléphant".chars().count());
    }

    #[test]
    fn complete_ignores_non_letters() {
        assert!(is_complete("c'est", &set("cest")));
        assert!(!is_complete("c'est", &set("ces")));
    }

    #[test]
    fn letter_positions_keep_repeats() {
        let positions = letter_positions("Été-t");
        assert_eq!(positions, vec![('e', 'É'), ('t', 't'), ('e', 'é'), ('t', 't')]);
    }

    #[test]
    fn distinct_letters_keeps_first_spelling() {
        let letters = distinct_letters("Été");
        assert_eq!(letters, vec![('e', 'É'), ('t', 't')]);
    }
}
