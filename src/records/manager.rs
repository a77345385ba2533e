//! Record sets - load guest and contact lists from JSON.
//!
//! CHANGELOG:
//! - 10/17/2026 - Guest details routed through smart field extraction
//! - 10/16/2026 - Skip contacts without a phone
//! - 10/15/2026 - Initial implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use super::columns::{extract_smart_fields, phone_column, resolve_name_source};
use super::error::{ListKind, RecordError};
use super::row::RecordRow;
use crate::matching::{Contact, Guest};

pub const GUESTS_ENV_VAR: &str = "GUESTMATCH_GUESTS";
pub const CONTACTS_ENV_VAR: &str = "GUESTMATCH_CONTACTS";

/// Wrapper key accepted for either list kind.
const GENERIC_WRAPPER_KEY: &str = "rows";

/// Path of a list taken from its environment variable, if set.
pub fn default_list_path(kind: ListKind) -> Option<PathBuf> {
    let var = match kind {
        ListKind::Guests => GUESTS_ENV_VAR,
        ListKind::Contacts => CONTACTS_ENV_VAR,
    };
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Rows of one guest or contact list.
#[derive(Debug, Clone)]
pub struct RecordSet {
    kind: ListKind,
    rows: Vec<RecordRow>,
}

impl RecordSet {
    pub fn new(kind: ListKind, rows: Vec<RecordRow>) -> Self {
        Self { kind, rows }
    }

    /// Load a list from a JSON file.
    ///
    /// Supports:
    /// - `[...]` (flat array of row objects)
    /// - `{"guests": [...]}` / `{"contacts": [...]}` matching `kind`
    /// - `{"rows": [...]}`
    pub fn load<P: AsRef<Path>>(path: P, kind: ListKind) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {} file: {:?}", kind, path))?;
        let set = Self::from_json_str(&content, kind)
            .with_context(|| format!("Failed to load {} file: {:?}", kind, path))?;
        debug!(kind = %kind, rows = set.len(), path = %path.display(), "loaded record set");
        Ok(set)
    }

    pub fn from_json_str(content: &str, kind: ListKind) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .with_context(|| format!("Failed to parse {} JSON", kind))?;
        let unsupported = || RecordError::UnsupportedShape {
            kind,
            key: kind.wrapper_key(),
        };

        let items = match &value {
            Value::Array(items) => items,
            Value::Object(map) => map
                .get(kind.wrapper_key())
                .or_else(|| map.get(GENERIC_WRAPPER_KEY))
                .and_then(Value::as_array)
                .ok_or_else(unsupported)?,
            _ => return Err(unsupported().into()),
        };

        let rows = items
            .iter()
            .map(|item| {
                item.as_object()
                    .map(RecordRow::from_json_object)
                    .ok_or_else(unsupported)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self::new(kind, rows))
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build engine guests. Rows whose name normalizes to nothing are skipped.
    ///
    /// Details are every other non-empty cell (phone excluded), reduced to
    /// side / group / count.
    pub fn to_guests(&self) -> Result<Vec<Guest>, RecordError> {
        if self.rows.is_empty() {
            return Ok(Vec::new());
        }
        let source = resolve_name_source(&self.rows)
            .ok_or(RecordError::MissingNameColumn(ListKind::Guests))?;
        let phone = phone_column(&self.rows);

        let mut excluded: Vec<&str> = source.columns();
        if let Some(p) = phone.as_deref() {
            excluded.push(p);
        }

        let mut guests = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let details: Vec<(String, String)> = row
                .cells()
                .iter()
                .filter(|(k, v)| !excluded.contains(&k.as_str()) && !v.trim().is_empty())
                .cloned()
                .collect();
            let guest = Guest::with_details(source.extract(row), extract_smart_fields(&details));
            if guest.prepared.is_empty() {
                debug!(row = i, name = %guest.name, "skipping guest with empty name");
                continue;
            }
            guests.push(guest);
        }
        Ok(guests)
    }

    /// Build engine contacts. Rows without a name or a phone are skipped.
    pub fn to_contacts(&self) -> Result<Vec<Contact>, RecordError> {
        if self.rows.is_empty() {
            return Ok(Vec::new());
        }
        let source = resolve_name_source(&self.rows)
            .ok_or(RecordError::MissingNameColumn(ListKind::Contacts))?;
        let phone = phone_column(&self.rows).ok_or(RecordError::MissingPhoneColumn)?;

        let mut contacts = Vec::with_capacity(self.rows.len());
        let mut missing_phone = 0usize;
        for (i, row) in self.rows.iter().enumerate() {
            let contact = Contact::new(source.extract(row), row.text(&phone));
            if contact.prepared.is_empty() {
                debug!(row = i, "skipping contact with empty name");
                continue;
            }
            if contact.phone.is_empty() {
                missing_phone += 1;
                continue;
            }
            contacts.push(contact);
        }
        if missing_phone > 0 {
            warn!(skipped = missing_phone, column = %phone, "contacts without a phone were skipped");
        }
        Ok(contacts)
    }
}

/// Reject runs the engine cannot do anything useful with.
pub fn validate(guests: &[Guest], contacts: &[Contact]) -> Result<(), RecordError> {
    if guests.is_empty() {
        return Err(RecordError::EmptyGuests);
    }
    if contacts.is_empty() {
        return Err(RecordError::EmptyContacts);
    }
    Ok(())
}
