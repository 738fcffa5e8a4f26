//! Relation identifier normalization
//!
//! Relation IDs in the model are CapWords labels that may carry accents
//! (`GehörtZu`). Generated code needs snake_case ASCII (`gehort_zu`).

use unicode_normalization::UnicodeNormalization;

/// Fold an identifier to ASCII
///
/// Compatibility decomposition splits accented letters into base letter plus
/// combining mark; anything still outside ASCII is dropped.
pub fn ascii_fold(raw: &str) -> String {
    raw.nfkd().filter(char::is_ascii).collect()
}

/// Turn an ASCII CapWords identifier into snake_case
///
/// Every uppercase letter becomes `_` plus its lowercase form. The underscore
/// produced by a leading capital is then removed.
pub fn snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for c in ident.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.starts_with('_') {
        out.remove(0);
    }
    out
}

/// Normalize a raw relation identifier into its code identifier
///
/// ```
/// use xml2models::model::normalize_relation_id;
///
/// assert_eq!(normalize_relation_id("HasAuthor"), "has_author");
/// assert_eq!(normalize_relation_id("WrittenInLanguage"), "written_in_language");
/// ```
pub fn normalize_relation_id(raw: &str) -> String {
    snake_case(&ascii_fold(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_capwords() {
        assert_eq!(normalize_relation_id("HasAuthor"), "has_author");
        assert_eq!(normalize_relation_id("WrittenInLanguage"), "written_in_language");
        assert_eq!(normalize_relation_id("Is"), "is");
    }

    #[test]
    fn test_accents_collapse_to_base_letter() {
        assert_eq!(ascii_fold("GehörtZu"), "GehortZu");
        assert_eq!(normalize_relation_id("GehörtZu"), "gehort_zu");
        assert_eq!(normalize_relation_id("ÜbersetztVon"), "ubersetzt_von");
    }

    #[test]
    fn test_characters_without_ascii_form_are_dropped() {
        assert_eq!(ascii_fold("Has\u{4E2D}Author"), "HasAuthor");
        assert_eq!(normalize_relation_id("Straße"), "strae");
    }

    #[test]
    fn test_compatibility_forms_are_folded() {
        // U+FB01 LATIN SMALL LIGATURE FI decomposes to "fi"
        assert_eq!(normalize_relation_id("Has\u{FB01}le"), "hasfile");
    }

    #[test]
    fn test_consecutive_capitals() {
        assert_eq!(normalize_relation_id("HasURL"), "has_u_r_l");
    }

    #[test]
    fn test_already_normalized_is_unchanged() {
        assert_eq!(normalize_relation_id("has_author"), "has_author");
        assert_eq!(normalize_relation_id("is"), "is");
    }

    #[test]
    fn test_lowercase_initial_keeps_first_letter() {
        assert_eq!(normalize_relation_id("hasAuthor"), "has_author");
    }

    #[test]
    fn test_empty_identifier() {
        assert_eq!(normalize_relation_id(""), "");
        assert_eq!(normalize_relation_id("\u{4E2D}"), "");
    }
}
