//! Column classification for loosely structured guest and contact lists.
//!
//! Uploaded lists come with whatever headers their authors chose (Hebrew or
//! English). Columns are classified from their name plus a sample of values,
//! independently of the matching engine.
//!
//! CHANGELOG:
//! - 10/17/2026 - Smart field extraction for guest details
//! - 10/15/2026 - Initial implementation

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::row::RecordRow;

/// Rows sampled per column when classifying.
pub const SAMPLE_ROWS: usize = 10;

const PHONE_KEYWORDS: &[&str] = &["טלפון", "פלאפון", "נייד", "סלולר", "phone", "mobile", "cell", "מספר"];
const NAME_KEYWORDS: &[&str] = &["שם", "name", "מוזמן", "guest", "אורח"];
const COUNT_KEYWORDS: &[&str] = &["כמות", "מספר", "count", "qty", "quantity", "אורחים", "מוזמנים"];
const SIDE_KEYWORDS: &[&str] = &["צד", "side", "חתן", "כלה", "groom", "bride"];
const GROUP_KEYWORDS: &[&str] = &["קבוצה", "group", "סוג", "type", "קטגוריה", "משפחה", "חברים", "עבודה"];

/// Guest detail fields and the header keywords that supply them, by priority.
const FIELD_PRIORITY: &[(&str, &[&str])] = &[
    ("side", &["צד", "side", "חתן", "כלה", "groom", "bride"]),
    ("group", &["קבוצה", "group", "משפחה", "חברים", "עבודה", "family", "friends", "work"]),
    ("count", &["כמות", "quantity", "מוזמנים", "אורחים", "guests", "כמות מוזמנים"]),
];

const DIRECT_NAME_COLUMNS: &[&str] = &["שם מלא", "full name", "fullname", "guest name", "שם המוזמן", "name"];
const FIRST_NAME_COLUMNS: &[&str] = &["שם", "first", "firstname", "given"];
const LAST_NAME_COLUMNS: &[&str] = &["last", "lastname", "surname", "family"];
const NAME_LIKE_KEYWORDS: &[&str] = &["שם", "name", "guest", "מוזמן"];

static PHONE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{9,}").unwrap());
static HEBREW_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[א-ת]").unwrap());
static LATIN_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").unwrap());
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Phone,
    Name,
    Count,
    Side,
    Group,
    Other,
}

fn has_keyword(column: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| column.contains(k))
}

fn any_match(samples: &[String], re: &Regex) -> bool {
    samples.iter().any(|s| re.is_match(s))
}

/// Classify a column from its header and sample values.
///
/// Checks run in priority order: phone, name, count, side, group.
pub fn detect_column_kind<S: AsRef<str>>(column: &str, samples: &[S]) -> ColumnKind {
    let column = column.trim().to_lowercase();
    let samples: Vec<String> = samples.iter().map(|s| s.as_ref().to_lowercase()).collect();

    if has_keyword(&column, PHONE_KEYWORDS) || any_match(&samples, &PHONE_DIGITS) {
        return ColumnKind::Phone;
    }
    if has_keyword(&column, NAME_KEYWORDS) || any_match(&samples, &HEBREW_LETTER) || any_match(&samples, &LATIN_LETTER) {
        return ColumnKind::Name;
    }

    let numeric = samples
        .iter()
        .filter(|s| s.trim().parse::<f64>().is_ok())
        .count();
    let mostly_numeric = !samples.is_empty() && numeric as f64 > samples.len() as f64 * 0.7;
    if has_keyword(&column, COUNT_KEYWORDS) || mostly_numeric {
        return ColumnKind::Count;
    }
    if has_keyword(&column, SIDE_KEYWORDS) {
        return ColumnKind::Side;
    }
    if has_keyword(&column, GROUP_KEYWORDS) {
        return ColumnKind::Group;
    }
    ColumnKind::Other
}

/// Column names in first-seen order across all rows.
pub fn column_names(rows: &[RecordRow]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in rows {
        for (column, _) in row.cells() {
            if !names.contains(column) {
                names.push(column.clone());
            }
        }
    }
    names
}

/// Classify every column from its first [`SAMPLE_ROWS`] values.
pub fn map_columns(rows: &[RecordRow]) -> Vec<(String, ColumnKind)> {
    column_names(rows)
        .into_iter()
        .map(|column| {
            let samples: Vec<&str> = rows
                .iter()
                .take(SAMPLE_ROWS)
                .map(|r| r.get(&column).unwrap_or(""))
                .collect();
            let kind = detect_column_kind(&column, &samples);
            (column, kind)
        })
        .collect()
}

/// Where a row's full name comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSource {
    /// A single full-name column
    Column(String),
    /// First and last name columns joined by a space
    Split { first: String, last: String },
}

impl NameSource {
    pub fn extract(&self, row: &RecordRow) -> String {
        match self {
            NameSource::Column(c) => row.text(c).to_string(),
            NameSource::Split { first, last } => {
                format!("{} {}", row.text(first), row.text(last))
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }

    pub fn columns(&self) -> Vec<&str> {
        match self {
            NameSource::Column(c) => vec![c.as_str()],
            NameSource::Split { first, last } => vec![first.as_str(), last.as_str()],
        }
    }
}

/// Pick the name source: a full-name column, else first + last columns,
/// else the name-like column with the longest values, else the first column.
pub fn resolve_name_source(rows: &[RecordRow]) -> Option<NameSource> {
    let columns = column_names(rows);
    let lowered: Vec<String> = columns.iter().map(|c| c.trim().to_lowercase()).collect();

    if let Some(i) = lowered.iter().position(|c| DIRECT_NAME_COLUMNS.contains(&c.as_str())) {
        return Some(NameSource::Column(columns[i].clone()));
    }

    let first = lowered
        .iter()
        .position(|c| c.contains("פרטי") || FIRST_NAME_COLUMNS.contains(&c.as_str()));
    let last = lowered
        .iter()
        .position(|c| c.contains("משפחה") || LAST_NAME_COLUMNS.contains(&c.as_str()));
    if let (Some(f), Some(l)) = (first, last) {
        return Some(NameSource::Split {
            first: columns[f].clone(),
            last: columns[l].clone(),
        });
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, column) in lowered.iter().enumerate() {
        if !has_keyword(column, NAME_LIKE_KEYWORDS) {
            continue;
        }
        let mean = mean_len(rows, &columns[i]);
        if best.map_or(true, |(_, m)| mean > m) {
            best = Some((i, mean));
        }
    }
    if let Some((i, _)) = best {
        return Some(NameSource::Column(columns[i].clone()));
    }

    columns.into_iter().next().map(NameSource::Column)
}

fn mean_len(rows: &[RecordRow], column: &str) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let total: usize = rows.iter().map(|r| r.text(column).chars().count()).sum();
    total as f64 / rows.len() as f64
}

/// First column classified as a phone column.
pub fn phone_column(rows: &[RecordRow]) -> Option<String> {
    map_columns(rows)
        .into_iter()
        .find(|(_, kind)| *kind == ColumnKind::Phone)
        .map(|(column, _)| column)
}

/// Whether a list already carries phone numbers, and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneColumnReport {
    pub has_phone_column: bool,
    pub phone_column_name: Option<String>,
    pub filled_count: usize,
    pub empty_count: usize,
    pub total_rows: usize,
}

pub fn phone_column_report(rows: &[RecordRow]) -> PhoneColumnReport {
    let total_rows = rows.len();
    match phone_column(rows) {
        Some(column) => {
            let filled_count = rows.iter().filter(|r| !r.text(&column).is_empty()).count();
            PhoneColumnReport {
                has_phone_column: true,
                phone_column_name: Some(column),
                filled_count,
                empty_count: total_rows - filled_count,
                total_rows,
            }
        }
        None => PhoneColumnReport {
            has_phone_column: false,
            phone_column_name: None,
            filled_count: 0,
            empty_count: total_rows,
            total_rows,
        },
    }
}

/// Pick side / group / count out of free-form guest details.
///
/// For each field, the first detail whose key contains one of the field's
/// keywords decides it; an empty value leaves the field unset. Counts keep
/// their first run of digits.
pub fn extract_smart_fields(details: &[(String, String)]) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    for (field, keywords) in FIELD_PRIORITY {
        let Some((_, value)) = details
            .iter()
            .find(|(key, _)| has_keyword(&key.to_lowercase(), keywords))
        else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let value = if *field == "count" {
            DIGIT_RUN.find(value).map_or(value, |m| m.as_str())
        } else {
            value
        };
        fields.insert(field.to_string(), value.to_string());
    }

    fields
}
