//! guestmatch - Fast Rust CLI for matching guest lists to contacts
//!
//! Pairs each guest name (Hebrew or Latin) with likely contacts and their
//! phone numbers, tiered by confidence.
//!
//! CHANGELOG:
//! - 10/18/2026 - Added score, normalize, and columns commands
//! - 10/15/2026 - Initial scaffold with CLI skeleton

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use guestmatch::commands;
use guestmatch::config::MatchConfig;
use guestmatch::output::{self, OutputControls};
use guestmatch::records::{default_list_path, ListKind};

/// Fast Rust CLI for matching guest-list names to contact phone numbers.
#[derive(Parser, Debug)]
#[command(name = "guestmatch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Comma-separated field allowlist
    #[arg(long, global = true)]
    fields: Option<String>,

    /// Truncate text fields to this length
    #[arg(long, global = true)]
    max_text_chars: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match every guest against the contact list
    Match {
        /// Guest list JSON (default: $GUESTMATCH_GUESTS)
        guests: Option<PathBuf>,

        /// Contact list JSON (default: $GUESTMATCH_CONTACTS)
        contacts: Option<PathBuf>,

        /// Config file (default: $GUESTMATCH_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Max perfect matches kept in the output
        #[arg(long)]
        perfect_cap: Option<usize>,

        /// Auto-select threshold (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        auto_threshold: Option<u8>,

        /// Score guests on one thread
        #[arg(long)]
        sequential: bool,
    },

    /// Score one guest name against one contact name
    Score {
        guest: String,
        contact: String,
    },

    /// Show the normalized form and tokens of a name
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Classify the columns of a guest or contact file
    Columns {
        path: PathBuf,
    },
}

fn list_path(explicit: Option<PathBuf>, kind: ListKind) -> Result<PathBuf> {
    explicit
        .or_else(|| default_list_path(kind))
        .with_context(|| format!("No {} file given and ${} is not set", kind, env_var(kind)))
}

fn env_var(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Guests => guestmatch::records::manager::GUESTS_ENV_VAR,
        ListKind::Contacts => guestmatch::records::manager::CONTACTS_ENV_VAR,
    }
}

fn run_match(
    guests: Option<PathBuf>,
    contacts: Option<PathBuf>,
    config: Option<PathBuf>,
    perfect_cap: Option<usize>,
    auto_threshold: Option<u8>,
    sequential: bool,
    output: &OutputControls,
) -> Result<()> {
    let mut match_config = MatchConfig::resolve(config.as_deref())?;
    if let Some(cap) = perfect_cap {
        match_config.perfect_cap = cap;
    }
    if let Some(threshold) = auto_threshold {
        match_config.auto_select_threshold = threshold;
    }
    if sequential {
        match_config.parallel = false;
    }
    match_config.validate()?;

    let guests = list_path(guests, ListKind::Guests)?;
    let contacts = list_path(contacts, ListKind::Contacts)?;
    commands::matching::run(&guests, &contacts, &match_config, output)
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Build output controls from global flags
    let output_controls = OutputControls {
        json: cli.json,
        compact: cli.compact,
        fields: cli.fields.clone(),
        max_text_chars: cli.max_text_chars,
    };

    let result = match cli.command {
        Command::Match { guests, contacts, config, perfect_cap, auto_threshold, sequential } => {
            run_match(guests, contacts, config, perfect_cap, auto_threshold, sequential, &output_controls)
        }
        Command::Score { guest, contact } => {
            commands::inspect::score(&guest, &contact, &output_controls)
        }
        Command::Normalize { text } => {
            commands::inspect::normalize(&text.join(" "), &output_controls)
        }
        Command::Columns { path } => {
            commands::columns::run(&path, &output_controls)
        }
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            if cli.json {
                println!("{}", output::format_error(&format!("{:#}", e)));
            }
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
