//! Guest and contact lists: loading, column sniffing, validation.

pub mod columns;
pub mod error;
pub mod manager;
pub mod row;

pub use columns::{detect_column_kind, extract_smart_fields, map_columns, phone_column_report, ColumnKind, PhoneColumnReport};
pub use error::{ListKind, RecordError};
pub use manager::{default_list_path, validate, RecordSet};
pub use row::RecordRow;
