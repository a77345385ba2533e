//! Validation errors raised before the matching engine runs.

use std::fmt;

use thiserror::Error;

/// Which side of a matching run a record list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Guests,
    Contacts,
}

impl ListKind {
    /// Key under which a wrapped JSON file holds its rows.
    pub fn wrapper_key(&self) -> &'static str {
        match self {
            ListKind::Guests => "guests",
            ListKind::Contacts => "contacts",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Guests => write!(f, "guest"),
            ListKind::Contacts => write!(f, "contact"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("guest list has no usable rows")]
    EmptyGuests,

    #[error("contact list has no usable rows")]
    EmptyContacts,

    #[error("no name column found in {0} list")]
    MissingNameColumn(ListKind),

    #[error("no phone column found in contact list")]
    MissingPhoneColumn,

    #[error("unsupported {kind} file: expected an array of row objects or {{\"{key}\": [...]}}")]
    UnsupportedShape { kind: ListKind, key: &'static str },
}
