//! String and token similarity metrics.
//!
//! Token-level fuzzy equality uses strsim's normalized Levenshtein. The
//! whole-string ratios (`ratio`, `token_set_ratio`, `partial_ratio`) follow
//! the fuzzywuzzy family and are built on the insert/delete ("indel")
//! distance, so a substitution costs 2.
//!
//! CHANGELOG:
//! - 10/19/2026 - Value-based consumption in fuzzy_jaccard
//! - 10/12/2026 - Initial port of ratio helpers

use std::collections::{BTreeSet, HashSet};

use strsim::normalized_levenshtein;

/// Minimum normalized Levenshtein similarity for two tokens to be equal.
pub const TOKEN_SIMILARITY_THRESHOLD: f64 = 0.90;

/// Fuzzy token equality: identical, or at least 90% Levenshtein-similar.
pub fn fuzzy_eq(a: &str, b: &str) -> bool {
    a == b || normalized_levenshtein(a, b) >= TOKEN_SIMILARITY_THRESHOLD
}

/// Greedy fuzzy Jaccard between two token lists, in `[0, 1]`.
///
/// Each token of `a`, in order, takes the first not-yet-used token value of
/// `b` it fuzzy-equals. The match is first-fit, not maximal, so the result
/// depends on argument order: `fuzzy_jaccard(a, b)` and
/// `fuzzy_jaccard(b, a)` can differ.
///
/// Used values are tracked by value, so duplicate tokens in `b` are consumed
/// together. Two empty lists give 1.0.
pub fn fuzzy_jaccard<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let mut used: HashSet<&str> = HashSet::new();
    let mut matched = 0usize;

    for g in a.iter().map(|s| s.as_ref()) {
        let hit: Option<&str> = b
            .iter()
            .map(|s| s.as_ref())
            .find(|c| !used.contains(c) && fuzzy_eq(g, c));
        if let Some(c) = hit {
            used.insert(c);
            matched += 1;
        }
    }

    let unique_a: HashSet<&str> = a.iter().map(|s| s.as_ref()).collect();
    let unique_b: HashSet<&str> = b.iter().map(|s| s.as_ref()).collect();
    let union = (unique_a.len() + unique_b.len()).saturating_sub(matched);
    if union == 0 {
        return 1.0;
    }
    // Duplicate tokens in `a` can out-count the unique union
    (matched as f64 / union as f64).min(1.0)
}

/// Insert/delete edit distance between two strings (by chars).
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    a.len() + b.len() - 2 * lcs_len(&a, &b)
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Turn a distance over `lensum` characters into a 0-100 similarity.
fn norm_similarity(dist: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        return 100.0;
    }
    100.0 * (1.0 - dist as f64 / lensum as f64)
}

/// Character similarity ratio (0.0 - 100.0).
pub fn ratio(a: &str, b: &str) -> f64 {
    let lensum = a.chars().count() + b.chars().count();
    norm_similarity(indel_distance(a, b), lensum)
}

/// Token set ratio (0.0 - 100.0).
///
/// Compares the shared tokens against each side's remainder. A side whose
/// tokens are a subset of the other's scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersect: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab_joined = diff_ab.join(" ");
    let diff_ba_joined = diff_ba.join(" ");
    let ab_len = diff_ab_joined.chars().count();
    let ba_len = diff_ba_joined.chars().count();
    let sect_len = intersect.join(" ").chars().count();
    let sep = usize::from(sect_len != 0);

    let sect_ab_len = sect_len + sep + ab_len;
    let sect_ba_len = sect_len + sep + ba_len;

    let remainder = norm_similarity(
        indel_distance(&diff_ab_joined, &diff_ba_joined),
        sect_ab_len + sect_ba_len,
    );
    if sect_len == 0 {
        return remainder;
    }

    // "sect" vs "sect + remainder" differ only by the remainder's length
    let sect_ab = norm_similarity(sep + ab_len, sect_len + sect_ab_len);
    let sect_ba = norm_similarity(sep + ba_len, sect_len + sect_ba_len);

    remainder.max(sect_ab).max(sect_ba)
}

/// Best `ratio` of the shorter string against any window of the longer
/// (0.0 - 100.0). Windows clipped at either end are included.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.len() == b.len() {
        return best_window_ratio(&a, &b).max(best_window_ratio(&b, &a));
    }
    if a.len() < b.len() {
        best_window_ratio(&a, &b)
    } else {
        best_window_ratio(&b, &a)
    }
}

fn best_window_ratio(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let h = haystack.len();
    let needle: String = needle.iter().collect();
    let window_ratio = |w: &[char]| ratio(&needle, &w.iter().collect::<String>());

    let mut best: f64 = 0.0;
    let windows = (1..n)
        .map(|i| &haystack[..i])
        .chain((0..=h - n).map(|i| &haystack[i..i + n]))
        .chain((h - n + 1..h).map(|i| &haystack[i..]));

    for window in windows {
        best = best.max(window_ratio(window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_eq() {
        assert!(fuzzy_eq("cohen", "cohen"));
        assert!(fuzzy_eq("abcdefghij", "abcdefghix"));
        assert!(!fuzzy_eq("cohen", "kohen"));
        // Symmetric
        assert_eq!(fuzzy_eq("dana", "dina"), fuzzy_eq("dina", "dana"));
    }

    #[test]
    fn test_jaccard_identical_and_disjoint() {
        assert_eq!(fuzzy_jaccard(&["amir", "cohen"], &["amir", "cohen"]), 1.0);
        assert_eq!(fuzzy_jaccard(&["amir"], &["dana"]), 0.0);
        let empty: [&str; 0] = [];
        assert_eq!(fuzzy_jaccard(&empty, &empty), 1.0);
    }

    #[test]
    fn test_jaccard_partial() {
        let j = fuzzy_jaccard(&["amir", "mordecha"], &["amir", "mordecha", "cocktails"]);
        assert!((j - 2.0 / 3.0).abs() < 1e-9, "was {}", j);
    }

    #[test]
    fn test_jaccard_fuzzy_tokens_count() {
        // 10-char tokens one edit apart are 90% similar
        assert_eq!(fuzzy_jaccard(&["abcdefghij"], &["abcdefghix"]), 1.0);
        let j = fuzzy_jaccard(&["abcdefghij", "dana"], &["abcdefghix"]);
        assert!((j - 0.5).abs() < 1e-9, "was {}", j);
    }

    #[test]
    fn test_jaccard_is_not_symmetric() {
        // Forward: the duplicate "abcdefghij" values in b are consumed by
        // the first match, stranding "abcdefghix". Backward: the second
        // duplicate falls through to the fuzzy neighbour.
        let a = ["abcdefghij", "abcdefghix", "zzzzzzzzzz"];
        let b = ["abcdefghij", "abcdefghij"];
        let forward = fuzzy_jaccard(&a, &b);
        let backward = fuzzy_jaccard(&b, &a);
        assert!((forward - 1.0 / 3.0).abs() < 1e-9, "was {}", forward);
        assert_eq!(backward, 1.0);
    }

    #[test]
    fn test_jaccard_stays_in_range_with_duplicates() {
        let j = fuzzy_jaccard(&["abcdefghij", "abcdefghij"], &["abcdefghij", "abcdefghix"]);
        assert_eq!(j, 1.0);
    }

    #[test]
    fn test_indel_distance() {
        assert_eq!(indel_distance("", ""), 0);
        assert_eq!(indel_distance("abc", "abc"), 0);
        // substitution costs delete + insert
        assert_eq!(indel_distance("abc", "abd"), 2);
        assert_eq!(indel_distance("abc", ""), 3);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("dana", "dana"), 100.0);
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        // 2 * lcs(3) / 8
        assert!((ratio("dana", "dina") - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_token_set_ratio_subset() {
        assert_eq!(token_set_ratio("amir mordecha", "amir mordecha cocktails"), 100.0);
        assert_eq!(token_set_ratio("cohen david", "david cohen"), 100.0);
    }

    #[test]
    fn test_token_set_ratio_disjoint_falls_back_to_remainder() {
        assert_eq!(token_set_ratio("abc", "xyz"), 0.0);
        assert_eq!(token_set_ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_token_set_ratio_shared_and_different() {
        // sect="cohen" (5), ab="dana" (4), ba="dina" (4)
        // remainders differ by one substitution: indel 2 over 10 + 10
        let r = token_set_ratio("dana cohen", "dina cohen");
        let expected = 90.0;
        assert!((r - expected).abs() < 1e-9, "was {}", r);
    }

    #[test]
    fn test_partial_ratio() {
        assert_eq!(partial_ratio("cohen", "dana cohen home"), 100.0);
        assert_eq!(partial_ratio("abc", ""), 0.0);
        assert!(partial_ratio("xyz", "abcdef") < 50.0);
        // Clipped window at the end of the haystack
        assert!((partial_ratio("fgh", "abcdefg") - ratio("fgh", "fg")).abs() < 1e-9);
    }
}
