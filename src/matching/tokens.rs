//! Tokenizer: splits a normalized name into cleaned name tokens.
//!
//! Label words ("mobile", military reserve markers) are dropped before
//! cleanup; relation words ("son of", "family") are dropped after it.
//! Both tables are written in source form and normalized once, so Hebrew
//! entries go through the same transliteration as the names they filter.
//!
//! CHANGELOG:
//! - 10/19/2026 - Build word tables through the normalizer
//! - 10/12/2026 - Initial implementation

use std::collections::HashSet;
use std::sync::LazyLock;

use super::normalize::normalize;

/// Labels attached to a contact name that are not part of the name.
const SUFFIX_SOURCE: &[&str] = &[
    // Military reserve
    "מילואים", "miluyim", "miloyim", "mil",
    // Phone / affiliation labels
    "נייד", "סלולר", "סלולרי", "בית", "עבודה", "עסקי", "אישי", "משרד",
    "mobile", "cell", "home", "work", "office", "business", "personal",
];

/// Relation and honorific words carrying no identity.
///
/// Hebrew "uncle" is left out: it is spelled like the given name David.
const GENERIC_SOURCE: &[&str] = &[
    "של", "ה", "בן", "בת", "משפחת", "אחי", "אחות", "דודה",
    "of", "the", "son", "daughter", "family", "brother", "sister", "uncle", "aunt",
    "mr", "mrs", "ms", "dr",
];

static SUFFIX_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| normalized_set(SUFFIX_SOURCE));
static GENERIC_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| normalized_set(GENERIC_SOURCE));

fn normalized_set(words: &[&str]) -> HashSet<String> {
    words
        .iter()
        .map(|w| normalize(w))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether a raw token is a label word.
pub fn is_suffix_word(token: &str) -> bool {
    SUFFIX_WORDS.contains(token)
}

/// Whether a cleaned token is a relation/honorific word.
pub fn is_generic_word(token: &str) -> bool {
    GENERIC_WORDS.contains(token)
}

/// Clean one raw token. Returns an empty slice for label words.
fn clean_token(token: &str) -> &str {
    if is_suffix_word(token) {
        return "";
    }

    let mut tok = token;
    // Transliterated Hebrew "and" prefix
    if tok.starts_with('v') && tok.chars().count() > 2 {
        tok = &tok[1..];
    }
    if tok.chars().count() >= 4 && tok.ends_with('i') {
        tok = &tok[..tok.len() - 1];
    }
    tok
}

/// Split a normalized name into its cleaned tokens, left to right.
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .map(clean_token)
        .filter(|t| !t.is_empty() && !is_generic_word(t))
        .map(String::from)
        .collect()
}
