//! Name normalization: lowercase, punctuation to spaces, whitespace collapse,
//! and transliteration of any script to ASCII Latin.
//!
//! CHANGELOG:
//! - 10/20/2026 - Non-Hebrew scripts transliterated with deunicode
//! - 10/19/2026 - Re-apply punctuation cleanup after transliteration (idempotence)
//! - 10/12/2026 - Initial implementation

use deunicode::deunicode_char;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters that separate name parts and are replaced by a single space.
///
/// Includes Hebrew geresh/gershayim and the maqaf (Hebrew hyphen).
const SEPARATORS: &[char] = &[
    '|', '\\', '/', '(', ')', '[', ']', '"', '\'', '׳', '״', '.', ',', '-', '־', '“', '”', '‘',
    '’', '„',
];

/// Canonicalize a raw name.
///
/// Steps, in order: lowercase, separators to spaces, whitespace collapse and
/// trim, transliteration to Latin. Never fails; empty input gives an empty
/// string.
///
/// ```
/// use guestmatch::matching::normalize::normalize;
///
/// assert_eq!(normalize("  Cohen,  David (Home) "), "cohen david home");
/// assert_eq!(normalize("ישראל כהן"), "yshral khn");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned = collapse_whitespace(&replace_separators(&lowered));
    let latin = transliterate(&cleaned);

    // Transliteration can drop whole letters (ayin, lone niqqud) or emit
    // compatibility punctuation, so the cleanup runs once more.
    collapse_whitespace(&replace_separators(&latin))
}

/// Normalize an optional value (absent normalizes to the empty string).
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

fn replace_separators(text: &str) -> String {
    text.chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// ASCII Latin rendering of a lowercase string.
///
/// Hebrew letters use the table in [`hebrew_letter`]; every other non-ASCII
/// character goes through deunicode. Characters deunicode has no rendering
/// for are dropped.
fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.nfkd() {
        if ch.is_ascii() {
            out.push(ch.to_ascii_lowercase());
            continue;
        }
        if is_combining_mark(ch) {
            continue;
        }
        if let Some(latin) = hebrew_letter(ch) {
            out.push_str(latin);
            continue;
        }
        if let Some(latin) = deunicode_char(ch) {
            out.push_str(&latin.to_ascii_lowercase());
        }
    }
    out
}

/// Standard romanization of a Hebrew letter. Final forms map like their
/// base letters; ayin is silent.
fn hebrew_letter(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'א' => "a",
        'ב' => "b",
        'ג' => "g",
        'ד' => "d",
        'ה' => "h",
        'ו' => "v",
        'ז' => "z",
        'ח' => "kh",
        'ט' => "t",
        'י' => "y",
        'ך' | 'כ' => "k",
        'ל' => "l",
        'ם' | 'מ' => "m",
        'ן' | 'נ' => "n",
        'ס' => "s",
        'ע' => "",
        'ף' | 'פ' => "p",
        'ץ' | 'צ' => "ts",
        'ק' => "q",
        'ר' => "r",
        'ש' => "sh",
        'ת' => "t",
        'װ' => "vv",
        'ױ' => "vy",
        'ײ' => "yy",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(normalize("David-Cohen"), "david cohen");
        assert_eq!(normalize("Cohen, David."), "cohen david");
        assert_eq!(normalize("[Dana] | (Levi) / \"Work\""), "dana levi work");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize("  dana \t  levi\n"), "dana levi");
    }

    #[test]
    fn test_empty_and_absent() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("-./,"), "");
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("Dana")), "dana");
    }

    #[test]
    fn test_hebrew_transliteration() {
        assert_eq!(normalize("ישראל כהן"), "yshral khn");
        assert_eq!(normalize("שרה לוי"), "shrh lvy");
        // Final forms behave like base letters
        assert_eq!(normalize("ך"), normalize("כ"));
    }

    #[test]
    fn test_hebrew_punctuation() {
        assert_eq!(normalize("צה״ל"), "tsh l");
        assert_eq!(normalize("ג׳ורג׳"), "g vrg");
    }

    #[test]
    fn test_other_scripts_become_ascii() {
        assert_eq!(normalize("Иван Петров"), "ivan petrov");
        assert_eq!(normalize("Γιώργος"), "giorgos");
        for name in ["محمد علي", "王伟", "Søren Łukasz"] {
            let n = normalize(name);
            assert!(!n.is_empty(), "{name}");
            assert!(n.is_ascii(), "{name} -> {n}");
        }
        assert_eq!(normalize("Søren Łukasz"), "soren lukasz");
    }

    #[test]
    fn test_niqqud_and_diacritics_dropped() {
        assert_eq!(normalize("שָׁלוֹם"), normalize("שלום"));
        assert_eq!(normalize("José Müller"), "jose muller");
        assert_eq!(normalize("Straße"), "strasse");
    }

    #[test]
    fn test_silent_letter_does_not_leave_gaps() {
        // Lone ayin disappears entirely
        assert_eq!(normalize("dana ע levi"), "dana levi");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "[a-zA-Zא-תàéüßÖа-яА-Яα-ωΑ-Ωء-ي一-龥0-9 .,'\"()\\-/|׳״\t]{0,40}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert!(once.is_ascii());
        }

        #[test]
        fn normalize_has_no_edge_whitespace(s in "[a-zA-Zא-ת .,\\-]{0,40}") {
            let n = normalize(&s);
            prop_assert_eq!(n.trim(), n.as_str());
            prop_assert!(!n.contains("  "));
        }
    }
}
