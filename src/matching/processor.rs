//! Match processor: candidates for every guest, merged by phone, tiered.
//!
//! Per-guest work is independent and runs on the rayon pool. Tier ordering
//! and the perfect-tier cap need the complete result set, so they run
//! sequentially afterwards.
//!
//! CHANGELOG:
//! - 10/16/2026 - Parallel per-guest evaluation (rayon)
//! - 10/14/2026 - Phone merge split out of candidate selection
//! - 10/12/2026 - Initial implementation

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::MatchConfig;

use super::candidates::{best_score, top_matches, ScoredContact};
use super::model::{Contact, Guest};
use super::phone::format_phone;
use super::scorer::PERFECT_SCORE;

/// Separator between contact names merged under one phone.
pub const NAME_SEPARATOR: &str = " / ";

/// A contact (or several sharing a phone) proposed for a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub name: String,
    pub phone: String,
    pub score: u8,
    pub reason: String,
}

/// Confidence tier of a guest, by best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Perfect,
    Auto,
    Good,
    Weak,
}

impl Tier {
    pub fn classify(best_score: u8, config: &MatchConfig) -> Self {
        if best_score >= PERFECT_SCORE {
            Tier::Perfect
        } else if best_score >= config.auto_select_threshold {
            Tier::Auto
        } else if best_score >= config.display_floor {
            Tier::Good
        } else {
            Tier::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Perfect => "perfect",
            Tier::Auto => "auto",
            Tier::Good => "good",
            Tier::Weak => "weak",
        }
    }
}

/// Matching outcome for one guest.
#[derive(Debug, Clone, Serialize)]
pub struct GuestResult {
    pub guest: String,
    pub guest_details: BTreeMap<String, String>,
    pub candidates: Vec<Candidate>,
    pub best_score: u8,
    pub auto_selected: Option<Candidate>,
    pub tier: Tier,
}

/// Match every guest against the contacts and order the results by tier.
pub fn process(guests: &[Guest], contacts: &[Contact], config: &MatchConfig) -> Vec<GuestResult> {
    let results: Vec<GuestResult> = if config.parallel {
        guests
            .par_iter()
            .map(|g| evaluate_guest(g, contacts, config))
            .collect()
    } else {
        guests
            .iter()
            .map(|g| evaluate_guest(g, contacts, config))
            .collect()
    };

    let ordered = order_by_tier(results, config.perfect_cap);
    info!(
        guests = guests.len(),
        contacts = contacts.len(),
        returned = ordered.len(),
        auto_selected = ordered.iter().filter(|r| r.auto_selected.is_some()).count(),
        "matching complete"
    );
    ordered
}

/// Both candidate passes plus the phone merge for one guest.
pub fn evaluate_guest(guest: &Guest, contacts: &[Contact], config: &MatchConfig) -> GuestResult {
    let best = best_score(&guest.prepared, contacts, config);
    let limit_to_three = best >= config.auto_select_threshold;
    let rows = top_matches(&guest.prepared, contacts, limit_to_three, config);

    let candidates = merge_by_phone(&rows);
    let auto_selected = candidates
        .first()
        .filter(|c| c.score >= config.auto_select_threshold)
        .cloned();
    let tier = Tier::classify(best, config);

    debug!(
        guest = %guest.name,
        best_score = best,
        candidates = candidates.len(),
        tier = tier.as_str(),
        "guest evaluated"
    );

    GuestResult {
        guest: guest.name.clone(),
        guest_details: guest.details.clone(),
        candidates,
        best_score: best,
        auto_selected,
        tier,
    }
}

/// Merge rows whose formatted phones match.
///
/// A merged candidate joins the contributing names in row order and takes
/// score and reason from its highest-scoring row. Output is sorted by score
/// descending; equal scores keep first-seen order.
pub fn merge_by_phone(rows: &[ScoredContact<'_>]) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = Vec::new();
    let mut by_phone: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let phone = format_phone(&row.contact.phone);
        match by_phone.get(&phone) {
            Some(&idx) => {
                let existing = &mut merged[idx];
                existing.name.push_str(NAME_SEPARATOR);
                existing.name.push_str(&row.contact.name);
                if row.score > existing.score {
                    existing.score = row.score;
                    existing.reason = row.reason.clone();
                }
            }
            None => {
                by_phone.insert(phone.clone(), merged.len());
                merged.push(Candidate {
                    name: row.contact.name.clone(),
                    phone,
                    score: row.score,
                    reason: row.reason.clone(),
                });
            }
        }
    }

    merged.sort_by(|a, b| b.score.cmp(&a.score));
    merged
}

/// Concatenate tiers: perfect (capped), auto, good, weak. Guest order is
/// kept within each tier; perfect results past the cap are dropped.
pub fn order_by_tier(results: Vec<GuestResult>, perfect_cap: usize) -> Vec<GuestResult> {
    let mut perfect = Vec::new();
    let mut auto = Vec::new();
    let mut good = Vec::new();
    let mut weak = Vec::new();

    for result in results {
        match result.tier {
            Tier::Perfect => perfect.push(result),
            Tier::Auto => auto.push(result),
            Tier::Good => good.push(result),
            Tier::Weak => weak.push(result),
        }
    }

    if perfect.len() > perfect_cap {
        debug!(
            dropped = perfect.len() - perfect_cap,
            "perfect matches over cap dropped"
        );
        perfect.truncate(perfect_cap);
    }

    perfect
        .into_iter()
        .chain(auto)
        .chain(good)
        .chain(weak)
        .collect()
}
