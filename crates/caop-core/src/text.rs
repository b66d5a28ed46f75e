// crates/caop-core/src/text.rs
//
// Text keys and name surgery. Everything here is pure and total: any
// input string produces a value, and folded keys are only ever used for
// equality, never for display.

use once_cell::sync::Lazy;
use regex::Regex;

/// `"Anobra (CONDEIXA-A-NOVA)"`: the head capture is greedy, so the
/// parenthetical is the last one on the line.
static ENTITY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.+)\s\(([^)]+)\)").expect("valid entity-name pattern"));

/// One trailing `"(...)"` plus the whitespace around it.
static TRAILING_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("valid trailing-annotation pattern"));

/// Convert a name into a folded key suitable for cross-source comparison.
///
/// This performs:
/// 1\) Trim leading/trailing whitespace
/// 2\) Transliterate Unicode → ASCII (e.g. `Águeda` -> `Agueda`)
/// 3\) Normalize to lowercase
///
/// The sources disagree on casing, surrounding whitespace and diacritics
/// for the same entity; folding both sides makes those differences
/// invisible to the equality predicate. Folding is idempotent.
///
/// # Examples
///
/// ```rust
/// use caop_core::text::fold_key;
///
/// assert_eq!(fold_key(" São João "), "sao joao");
/// assert_eq!(fold_key("CONDEIXA-A-NOVA"), "condeixa-a-nova");
/// assert_eq!(fold_key(""), "");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s.trim()).to_lowercase()
}

/// Compares two names for equality after folding with [`fold_key`].
///
/// # Examples
///
/// ```rust
/// use caop_core::text::equals_folded;
///
/// assert!(equals_folded("Évora", "EVORA"));
/// assert!(equals_folded(" Sé Nova", "se nova"));
/// assert!(!equals_folded("Lisboa", "Porto"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Canonical form of an administrative code: the digits without leading
/// zeros. The sources disagree on digit width (`"0312"` vs `"312"`), so
/// codes are always compared in this form.
pub fn strip_leading_zeros(code: &str) -> &str {
    code.trim_start_matches('0')
}

/// Split a 2018-era compound display name into `(name, municipality)`.
///
/// The shape is `"<name> (<MUNICIPALITY>)"`. Returns `None` when the
/// value does not match; callers treat that as a structural error, not a
/// skippable record.
pub fn split_entity_name(s: &str) -> Option<(String, String)> {
    let caps = ENTITY_NAME.captures(s)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Remove one trailing parenthetical annotation from a 2021-era display
/// name, e.g. `"Alcochete (São João)"` → `"Alcochete"`. Names without a
/// trailing parenthetical pass through unchanged.
///
/// This is deliberately not [`split_entity_name`]: that one demands the
/// parenthetical and extracts it, this one merely discards it when
/// present. The two sources make different promises about what the
/// parentheses contain.
pub fn strip_trailing_annotation(s: &str) -> String {
    TRAILING_ANNOTATION.replace(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_key_ignores_case_whitespace_and_diacritics() {
        assert_eq!(fold_key(" À-B  "), fold_key("a-b"));
        assert_eq!(fold_key("São João da Madeira"), "sao joao da madeira");
        assert_eq!(fold_key("CONDEIXA-A-NOVA"), fold_key("Condeixa-a-Nova"));
    }

    #[test]
    fn fold_key_is_idempotent_and_total() {
        for s in ["", "  ", "Águeda", "Ponta Delgada (São Miguel)"] {
            assert_eq!(fold_key(&fold_key(s)), fold_key(s));
        }
        assert_eq!(fold_key(""), "");
    }

    #[test]
    fn leading_zeros_are_not_significant() {
        assert_eq!(strip_leading_zeros("0312"), strip_leading_zeros("312"));
        assert_ne!(strip_leading_zeros("0312"), strip_leading_zeros("0412"));
        assert_eq!(strip_leading_zeros("000"), "");
    }

    #[test]
    fn split_takes_the_last_parenthetical() {
        let (name, municipality) = split_entity_name("Anobra (CONDEIXA-A-NOVA)").unwrap();
        assert_eq!(name, "Anobra");
        assert_eq!(municipality, "CONDEIXA-A-NOVA");

        // Greedy head: an inner parenthetical stays with the name.
        let (name, municipality) =
            split_entity_name("Santa Maria (Sé) (LISBOA)").unwrap();
        assert_eq!(name, "Santa Maria (Sé)");
        assert_eq!(municipality, "LISBOA");
    }

    #[test]
    fn split_rejects_names_without_parenthetical() {
        assert!(split_entity_name("NoParenHere").is_none());
        assert!(split_entity_name("").is_none());
    }

    #[test]
    fn trailing_annotation_is_stripped() {
        assert_eq!(
            strip_trailing_annotation("União das freguesias de X (Anobra) "),
            "União das freguesias de X"
        );
        assert_eq!(strip_trailing_annotation("Anobra"), "Anobra");
        // Only the trailing one goes; an inner parenthetical is content.
        assert_eq!(
            strip_trailing_annotation("Santa Maria (Sé) de Lisboa"),
            "Santa Maria (Sé) de Lisboa"
        );
    }
}
