//! Candidate selection: rank every contact for one guest and keep a band.
//!
//! Once a near-certain match exists the band narrows to a few tight
//! candidates; otherwise a lower floor surfaces plausible matches for review.
//!
//! CHANGELOG:
//! - 10/14/2026 - Thresholds and caps from MatchConfig
//! - 10/12/2026 - Initial implementation

use std::cmp::Ordering;

use crate::config::MatchConfig;

use super::model::{Contact, PreparedName};
use super::scorer::{reason_prepared, score_prepared, PERFECT_SCORE};

/// One contact scored against one guest.
#[derive(Debug, Clone)]
pub struct ScoredContact<'a> {
    pub contact: &'a Contact,
    pub score: u8,
    pub reason: String,
}

/// Rank contacts for a guest.
///
/// The narrow band (`tight_floor`, `tight_cap`) applies when the best score
/// is perfect, or when `limit_to_three` is set and the best score reaches
/// the auto-select threshold. Otherwise the display band (`display_floor`,
/// `display_cap`) applies. Rows sort by score descending, then contact name
/// ascending.
pub fn top_matches<'a>(
    guest: &PreparedName,
    contacts: &'a [Contact],
    limit_to_three: bool,
    config: &MatchConfig,
) -> Vec<ScoredContact<'a>> {
    if guest.is_empty() {
        return Vec::new();
    }

    let scored: Vec<(&Contact, u8)> = contacts
        .iter()
        .map(|c| (c, score_prepared(guest, &c.prepared)))
        .collect();

    let Some(max_score) = scored.iter().map(|(_, s)| *s).max() else {
        return Vec::new();
    };

    let tight = max_score == PERFECT_SCORE
        || (limit_to_three && max_score >= config.auto_select_threshold);
    let (floor, cap) = if tight {
        (config.tight_floor, config.tight_cap)
    } else {
        (config.display_floor, config.display_cap)
    };

    let mut band: Vec<(&Contact, u8)> = scored.into_iter().filter(|(_, s)| *s >= floor).collect();
    band.sort_by(|a, b| rank_order(a, b));
    band.truncate(cap);

    band.into_iter()
        .map(|(contact, score)| ScoredContact {
            contact,
            score,
            reason: reason_prepared(guest, &contact.prepared, score),
        })
        .collect()
}

fn rank_order(a: &(&Contact, u8), b: &(&Contact, u8)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name))
}

/// Highest score among the rows the display pass returns (0 if none).
pub fn best_score(guest: &PreparedName, contacts: &[Contact], config: &MatchConfig) -> u8 {
    top_matches(guest, contacts, false, config)
        .iter()
        .map(|row| row.score)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contacts(names: &[&str]) -> Vec<Contact> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Contact::new(*n, format!("05000000{:02}", i)))
            .collect()
    }

    fn names(rows: &[ScoredContact<'_>]) -> Vec<String> {
        rows.iter().map(|r| r.contact.name.clone()).collect()
    }

    #[test]
    fn test_empty_guest_returns_nothing() {
        let cs = contacts(&["Dana Levi"]);
        let rows = top_matches(&PreparedName::new(""), &cs, false, &MatchConfig::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_contacts_returns_nothing() {
        let rows = top_matches(&PreparedName::new("Dana"), &[], false, &MatchConfig::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_perfect_match_narrows_band() {
        // 100 and 93 stay; nothing under 90 survives the tight band
        let cs = contacts(&[
            "Amir Mordechai Cocktails",
            "Amir Mordechai",
            "Amir Levi",
        ]);
        let rows = top_matches(
            &PreparedName::new("Amir Mordechai"),
            &cs,
            false,
            &MatchConfig::default(),
        );
        assert_eq!(names(&rows), vec!["Amir Mordechai", "Amir Mordechai Cocktails"]);
        assert_eq!(rows[0].score, 100);
        assert_eq!(rows[1].score, 93);
        assert_eq!(rows[1].reason, "overlap: amir, mordecha");
    }

    #[test]
    fn test_display_band_without_limit() {
        // Best is 93 but limit_to_three is off: floor 70
        let cs = contacts(&["Amir Mordechai Cocktails", "Amir Levi", "Yossi Cohen"]);
        let config = MatchConfig::default();
        let guest = PreparedName::new("Amir Mordechai");

        let rows = top_matches(&guest, &cs, false, &config);
        assert!(rows.iter().all(|r| r.score >= 70));
        assert_eq!(rows[0].contact.name, "Amir Mordechai Cocktails");

        let tight = top_matches(&guest, &cs, true, &config);
        assert!(tight.iter().all(|r| r.score >= 90));
        assert_eq!(names(&tight), vec!["Amir Mordechai Cocktails"]);
    }

    #[test]
    fn test_ties_break_by_name_and_cap_at_three() {
        let cs = contacts(&["Dana Levi", "Dana Levi", "Dana Levi", "Dana Levi"]);
        let rows = top_matches(&PreparedName::new("Dana Levi"), &cs, false, &MatchConfig::default());
        assert_eq!(rows.len(), 3);

        let cs = contacts(&["dana levi", "Dana Levi", "DANA LEVI"]);
        let rows = top_matches(&PreparedName::new("Dana Levi"), &cs, false, &MatchConfig::default());
        assert_eq!(names(&rows), vec!["DANA LEVI", "Dana Levi", "dana levi"]);
    }

    #[test]
    fn test_below_floor_dropped() {
        let cs = contacts(&["Yossi Mizrahi"]);
        let rows = top_matches(&PreparedName::new("Dana Levi"), &cs, false, &MatchConfig::default());
        assert!(rows.is_empty());
        assert_eq!(best_score(&PreparedName::new("Dana Levi"), &cs, &MatchConfig::default()), 0);
    }

    #[test]
    fn test_best_score() {
        let cs = contacts(&["Amir Mordechai Cocktails", "Amir Mordechai"]);
        let config = MatchConfig::default();
        assert_eq!(best_score(&PreparedName::new("Amir Mordechai"), &cs, &config), 100);
        assert_eq!(best_score(&PreparedName::new("Amir Mordechai"), &cs[..1], &config), 93);
    }
}
