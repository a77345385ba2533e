//! guestmatch library
//!
//! Matching engine, record loading, and CLI commands.
//!
//! CHANGELOG:
//! - 10/15/2026 - Records and commands split out of the binary
//! - 10/12/2026 - Initial library structure

pub mod commands;
pub mod config;
pub mod matching;
pub mod output;
pub mod records;
