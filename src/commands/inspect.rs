//! Inspection commands: score, normalize.
//!
//! Show what the engine sees for a single name or pair of names.

use anyhow::Result;
use serde::Serialize;

use crate::matching::scorer::{reason_prepared, score_prepared};
use crate::matching::PreparedName;
use crate::output::OutputControls;

#[derive(Debug, Serialize)]
pub struct NormalizeOutput {
    pub input: String,
    pub normalized: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreOutput {
    pub guest: NormalizeOutput,
    pub contact: NormalizeOutput,
    pub score: u8,
    pub reason: String,
}

fn describe(input: &str) -> (NormalizeOutput, PreparedName) {
    let prepared = PreparedName::new(input);
    let out = NormalizeOutput {
        input: input.to_string(),
        normalized: prepared.normalized().to_string(),
        tokens: prepared.tokens().to_vec(),
    };
    (out, prepared)
}

pub fn score_pair(guest: &str, contact: &str) -> ScoreOutput {
    let (guest_out, g) = describe(guest);
    let (contact_out, c) = describe(contact);
    let score = score_prepared(&g, &c);
    ScoreOutput {
        guest: guest_out,
        contact: contact_out,
        score,
        reason: reason_prepared(&g, &c, score),
    }
}

/// Score one guest name against one contact name.
pub fn score(guest: &str, contact: &str, output: &OutputControls) -> Result<()> {
    let result = score_pair(guest, contact);

    if output.json {
        output.print(&result);
    } else {
        println!("guest:   {:?} -> {:?} {:?}", result.guest.input, result.guest.normalized, result.guest.tokens);
        println!("contact: {:?} -> {:?} {:?}", result.contact.input, result.contact.normalized, result.contact.tokens);
        println!("score:   {}", result.score);
        if !result.reason.is_empty() {
            println!("reason:  {}", result.reason);
        }
    }

    Ok(())
}

/// Show the normalized form and tokens of a name.
pub fn normalize(text: &str, output: &OutputControls) -> Result<()> {
    let (result, _) = describe(text);

    if output.json {
        output.print(&result);
    } else {
        println!("{}", result.normalized);
        println!("tokens: {}", result.tokens.join(" "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_pair() {
        let out = score_pair("David Cohen", "Davidi Cohen");
        assert_eq!(out.guest.tokens, vec!["david", "cohen"]);
        assert_eq!(out.contact.normalized, "davidi cohen");
        assert_eq!(out.score, 100);
        assert_eq!(out.reason, "overlap: david, cohen");
    }

    #[test]
    fn test_score_pair_empty_side() {
        let out = score_pair("", "Dana");
        assert_eq!(out.score, 0);
        assert!(out.reason.is_empty());
    }
}
