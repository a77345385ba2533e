//! A parsed row: ordered (column, value) cells as strings.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordRow {
    cells: Vec<(String, String)>,
}

impl RecordRow {
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build from a JSON object. Column names are trimmed; nested arrays and
    /// objects are not cell values and are skipped.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let cells = object
            .iter()
            .filter_map(|(k, v)| cell_text(v).map(|text| (k.trim().to_string(), text)))
            .collect();
        Self { cells }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a column, trimmed; empty when absent.
    pub fn text(&self, column: &str) -> &str {
        self.get(column).map(str::trim).unwrap_or("")
    }

    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
