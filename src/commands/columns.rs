//! Columns command: classify the columns of a list before matching it.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::output::OutputControls;
use crate::records::{map_columns, phone_column_report, ColumnKind, ListKind, PhoneColumnReport, RecordSet};

#[derive(Debug, Serialize)]
pub struct ColumnInfo {
    pub column: String,
    pub kind: ColumnKind,
}

#[derive(Debug, Serialize)]
pub struct ColumnsOutput {
    pub columns: Vec<ColumnInfo>,
    pub phone: PhoneColumnReport,
}

pub fn describe(set: &RecordSet) -> ColumnsOutput {
    let columns = map_columns(set.rows())
        .into_iter()
        .map(|(column, kind)| ColumnInfo { column, kind })
        .collect();
    ColumnsOutput {
        columns,
        phone: phone_column_report(set.rows()),
    }
}

/// Classify every column of a guest or contact file.
pub fn run(path: &Path, output: &OutputControls) -> Result<()> {
    // Shape check only; either wrapper key is fine here
    let set = RecordSet::load(path, ListKind::Guests)
        .or_else(|_| RecordSet::load(path, ListKind::Contacts))?;
    let result = describe(&set);

    if output.json {
        output.print(&result);
        return Ok(());
    }

    println!("Columns ({} rows):", result.phone.total_rows);
    println!("{}", "-".repeat(40));
    for info in &result.columns {
        println!("{:<24} {:?}", info.column, info.kind);
    }
    match &result.phone.phone_column_name {
        Some(name) => println!(
            "\nPhone column '{}': {} filled, {} empty",
            name, result.phone.filled_count, result.phone.empty_count
        ),
        None => println!("\nNo phone column found."),
    }

    Ok(())
}
