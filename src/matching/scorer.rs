//! Name-pair scoring (0-100) and the human-readable reason for a score.
//!
//! CHANGELOG:
//! - 10/19/2026 - Half-to-even rounding for final scores
//! - 10/12/2026 - Initial implementation

use std::collections::HashSet;

use super::model::PreparedName;
use super::similarity::{fuzzy_jaccard, partial_ratio, ratio, token_set_ratio};

/// Score for an exact match after normalization or tokenization.
pub const PERFECT_SCORE: u8 = 100;

/// Score at which a match is treated as near-certain.
pub const HIGH_CONFIDENCE_THRESHOLD: u8 = 93;

const SET_WEIGHT: f64 = 0.6;
const FIRST_TOKEN_WEIGHT: f64 = 0.2;
const JACCARD_WEIGHT: f64 = 0.2;

/// Score two normalized names.
///
/// Returns 0 when either side is empty and 100 for equal strings or equal
/// token lists.
pub fn score(guest_normalized: &str, contact_normalized: &str) -> u8 {
    score_prepared(
        &PreparedName::from_normalized(guest_normalized),
        &PreparedName::from_normalized(contact_normalized),
    )
}

/// Score two prepared names. Same result as [`score`] on their normalized forms.
pub fn score_prepared(guest: &PreparedName, contact: &PreparedName) -> u8 {
    if guest.is_empty() || contact.is_empty() {
        return 0;
    }
    if guest.normalized().trim() == contact.normalized().trim() {
        return PERFECT_SCORE;
    }

    let g = guest.tokens();
    let c = contact.tokens();
    if g == c {
        return PERFECT_SCORE;
    }

    // Name made only of label/relation words
    if g.is_empty() || c.is_empty() {
        return to_score(partial_ratio(guest.normalized(), contact.normalized()));
    }

    let set_overlap = token_set_ratio(&g.join(" "), &c.join(" ")) / 100.0;
    let first_token = ratio(&g[0], &c[0]) / 100.0;
    let jaccard = fuzzy_jaccard(g, c);
    let penalty = length_gap_penalty(g.len(), c.len());

    let combined =
        SET_WEIGHT * set_overlap + FIRST_TOKEN_WEIGHT * first_token + JACCARD_WEIGHT * jaccard;
    to_score(combined * penalty * 100.0)
}

/// Penalty for token lists whose lengths differ by two or more.
pub fn length_gap_penalty(a: usize, b: usize) -> f64 {
    if a.abs_diff(b) >= 2 {
        a.min(b) as f64 / a.max(b) as f64
    } else {
        1.0
    }
}

fn to_score(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 100.0) as u8
}

/// Short explanation for a score: shared tokens, or a generic note for
/// high scores. Empty otherwise.
pub fn reason(guest_normalized: &str, contact_normalized: &str, score: u8) -> String {
    reason_prepared(
        &PreparedName::from_normalized(guest_normalized),
        &PreparedName::from_normalized(contact_normalized),
        score,
    )
}

pub fn reason_prepared(guest: &PreparedName, contact: &PreparedName, score: u8) -> String {
    let contact_tokens: HashSet<&str> = contact.tokens().iter().map(String::as_str).collect();
    let overlap: Vec<&str> = guest
        .tokens()
        .iter()
        .map(String::as_str)
        .filter(|t| contact_tokens.contains(t))
        .take(2)
        .collect();

    if !overlap.is_empty() {
        format!("overlap: {}", overlap.join(", "))
    } else if score >= HIGH_CONFIDENCE_THRESHOLD {
        "high confidence".to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::normalize::normalize;
    use proptest::prelude::*;

    fn score_raw(a: &str, b: &str) -> u8 {
        score(&normalize(a), &normalize(b))
    }

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(score("", "dana"), 0);
        assert_eq!(score("dana", ""), 0);
        assert_eq!(score("", ""), 0);
    }

    #[test]
    fn test_exact_hebrew() {
        assert_eq!(score_raw("ישראל כהן", "ישראל כהן"), 100);
    }

    #[test]
    fn test_trailing_i_variant_is_perfect() {
        assert_eq!(score_raw("David Cohen", "Davidi Cohen"), 100);
    }

    #[test]
    fn test_label_words_ignored() {
        assert_eq!(score_raw("Dana Levi", "Dana Levi mobile"), 100);
    }

    #[test]
    fn test_extra_token_scores_93() {
        // set 1.0, first token 1.0, jaccard 2/3
        assert_eq!(score_raw("Amir Mordechai", "Amir Mordechai Cocktails"), 93);
    }

    #[test]
    fn test_reordered_tokens() {
        // set 1.0, first tokens share no characters, jaccard 1.0
        assert_eq!(score_raw("David Cohen", "Cohen David"), 80);
    }

    #[test]
    fn test_length_gap_penalty() {
        assert_eq!(length_gap_penalty(1, 1), 1.0);
        assert_eq!(length_gap_penalty(2, 3), 1.0);
        assert_eq!(length_gap_penalty(1, 3), 1.0 / 3.0);
        assert_eq!(length_gap_penalty(4, 2), 0.5);
    }

    #[test]
    fn test_household_listing_penalized() {
        // set 1.0, first 1.0, jaccard 1/4, penalty 1/4
        assert_eq!(score_raw("Dana", "Dana Yossi Noa Ron"), 21);
    }

    #[test]
    fn test_only_generic_words_uses_partial_ratio() {
        // Guest tokens are empty, contact tokens are not
        let s = score_raw("the family", "family cohen");
        assert_eq!(s, to_score(partial_ratio("the family", "family cohen")));
        assert!(s > 0);
    }

    #[test]
    fn test_unrelated_names_score_low() {
        assert!(score_raw("Dana Levi", "Yossi Mizrahi") < 70);
    }

    #[test]
    fn test_reason() {
        let g = normalize("Amir Mordechai");
        let c = normalize("Amir Mordechai Cocktails");
        assert_eq!(reason(&g, &c, 93), "overlap: amir, mordecha");
        assert_eq!(reason("dana", "dani cohen", 95), "high confidence");
        assert_eq!(reason("dana", "yossi", 40), "");
    }

    #[test]
    fn test_cross_script_names_match() {
        assert_eq!(score_raw("Иван Петров", "Ivan Petrov"), 100);
    }

    #[test]
    fn test_repeated_contact_token_still_scores_100() {
        // Token lists differ, but every component of the formula saturates:
        // same token set, same first token, and the unique-token Jaccard is 1.
        let g = PreparedName::new("Amir Cohen");
        let c = PreparedName::new("Amir Cohen Cohen");
        assert_ne!(g.tokens(), c.tokens());
        assert_eq!(score_prepared(&g, &c), 100);
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(to_score(92.5), 92);
        assert_eq!(to_score(93.5), 94);
        assert_eq!(to_score(-1.0), 0);
    }

    proptest! {
        #[test]
        fn self_score_is_perfect(s in "[a-zA-Zא-ת ]{0,30}") {
            let n = normalize(&s);
            prop_assume!(!n.is_empty());
            prop_assert_eq!(score(&n, &n), 100);
        }

        #[test]
        fn empty_side_scores_zero(s in "[a-zA-Zא-ת ]{0,30}") {
            let n = normalize(&s);
            prop_assert_eq!(score("", &n), 0);
            prop_assert_eq!(score(&n, ""), 0);
        }

        #[test]
        fn score_is_bounded(a in "[a-z ]{0,25}", b in "[a-z ]{0,25}") {
            prop_assert!(score(&normalize(&a), &normalize(&b)) <= 100);
        }
    }
}
