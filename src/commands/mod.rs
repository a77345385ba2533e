//! Command implementations.
//!
//! CHANGELOG:
//! - 10/18/2026 - Added columns and inspect commands
//! - 10/15/2026 - Initial module structure

pub mod columns;
pub mod inspect;
pub mod matching;
