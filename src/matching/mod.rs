//! Name-matching engine.
//!
//! Pure functions of two name lists: normalize, tokenize, score, select
//! candidates per guest, merge by phone, and tier the results.
//!
//! CHANGELOG:
//! - 10/12/2026 - Initial module structure

pub mod candidates;
pub mod model;
pub mod normalize;
pub mod phone;
pub mod processor;
pub mod scorer;
pub mod similarity;
pub mod tokens;

pub use candidates::{top_matches, ScoredContact};
pub use model::{Contact, Guest, PreparedName};
pub use processor::{process, Candidate, GuestResult, Tier};
pub use scorer::{reason, score};
