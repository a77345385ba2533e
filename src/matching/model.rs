//! Engine data model: prepared names, contacts, guests.
//!
//! Names are normalized and tokenized once when a record enters the engine,
//! so a matching run scores G x C pairs without re-deriving either side.

use std::collections::BTreeMap;

use serde::Serialize;

use super::normalize::normalize;
use super::tokens::tokenize;

/// A normalized name together with its token list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PreparedName {
    normalized: String,
    tokens: Vec<String>,
}

impl PreparedName {
    /// Prepare a raw, user-supplied name.
    pub fn new(raw: &str) -> Self {
        Self::from_normalized(normalize(raw))
    }

    /// Wrap an already-normalized name.
    pub fn from_normalized(normalized: impl Into<String>) -> Self {
        let normalized = normalized.into();
        let tokens = tokenize(&normalized);
        Self { normalized, tokens }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// An entry of the contact list.
#[derive(Debug, Clone)]
pub struct Contact {
    /// Name as it appears in the source list
    pub name: String,
    /// Phone as it appears in the source list (formatted at merge time)
    pub phone: String,
    pub prepared: PreparedName,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        let name = name.into();
        let prepared = PreparedName::new(&name);
        Self {
            name,
            phone: phone.into(),
            prepared,
        }
    }
}

/// An entry of the guest list.
#[derive(Debug, Clone)]
pub struct Guest {
    pub name: String,
    /// Extracted auxiliary details (side, group, count)
    pub details: BTreeMap<String, String>,
    pub prepared: PreparedName,
}

impl Guest {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_details(name, BTreeMap::new())
    }

    pub fn with_details(name: impl Into<String>, details: BTreeMap<String, String>) -> Self {
        let name = name.into();
        let prepared = PreparedName::new(&name);
        Self {
            name,
            details,
            prepared,
        }
    }
}
