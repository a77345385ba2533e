//! Match command: pair every guest with candidate contacts.
//!
//! CHANGELOG:
//! - 10/18/2026 - Report counts for JSON consumers
//! - 10/15/2026 - Initial implementation

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::config::MatchConfig;
use crate::matching::{process, GuestResult, Tier};
use crate::output::OutputControls;
use crate::records::{validate, ListKind, RecordSet};

/// Full output of a matching run.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub results: Vec<GuestResult>,
    pub total_guests: usize,
    pub auto_selected_count: usize,
    pub perfect_matches_count: usize,
}

/// Validate both lists and run the engine.
pub fn build_report(guests: &RecordSet, contacts: &RecordSet, config: &MatchConfig) -> Result<MatchReport> {
    let guests = guests.to_guests()?;
    let contacts = contacts.to_contacts()?;
    validate(&guests, &contacts)?;

    let results = process(&guests, &contacts, config);
    let auto_selected_count = results.iter().filter(|r| r.auto_selected.is_some()).count();
    let perfect_matches_count = results.iter().filter(|r| r.tier == Tier::Perfect).count();

    Ok(MatchReport {
        results,
        total_guests: guests.len(),
        auto_selected_count,
        perfect_matches_count,
    })
}

/// Load both files, match, and print.
pub fn run(guests_path: &Path, contacts_path: &Path, config: &MatchConfig, output: &OutputControls) -> Result<()> {
    let guests = RecordSet::load(guests_path, ListKind::Guests)?;
    let contacts = RecordSet::load(contacts_path, ListKind::Contacts)?;
    let report = build_report(&guests, &contacts, config)?;

    if output.json {
        output.print(&report);
        return Ok(());
    }

    println!(
        "Matched {} guests ({} auto-selected, {} perfect):",
        report.total_guests, report.auto_selected_count, report.perfect_matches_count
    );
    println!("{}", "-".repeat(60));
    for result in &report.results {
        print_result(result);
    }

    Ok(())
}

fn print_result(result: &GuestResult) {
    let details = if result.guest_details.is_empty() {
        String::new()
    } else {
        let parts: Vec<String> = result
            .guest_details
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!(" ({})", parts.join(", "))
    };
    println!(
        "[{}] {} - best {}{}",
        result.tier.as_str(),
        result.guest,
        result.best_score,
        details
    );

    if result.candidates.is_empty() {
        println!("    (no candidates)");
    }
    for candidate in &result.candidates {
        let marker = match &result.auto_selected {
            Some(selected) if selected == candidate => "*",
            _ => " ",
        };
        let reason = if candidate.reason.is_empty() {
            String::new()
        } else {
            format!("  [{}]", candidate.reason)
        };
        println!(
            "  {} {:>3}  {}  {}{}",
            marker, candidate.score, candidate.phone, candidate.name, reason
        );
    }
}
