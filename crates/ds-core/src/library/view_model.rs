use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Poster shown when a record has no usable poster URL.
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Poster";

/// Sentinel the upstream metadata source uses for "no value".
const NOT_AVAILABLE: &str = "N/A";

/// Base URL of the external title page an entry's `external_id` points at.
const EXTERNAL_TITLE_BASE: &str = "https://www.imdb.com/title/";

/// Normalized, render-ready projection of one raw provider record.
///
/// Recomputed wholesale on every projection pass and never mutated in
/// place. `original_index` is the record's position in the provider
/// snapshot at projection time; it is only meaningful within that one
/// snapshot and is used as a last-resort handle for records that carry no
/// identifier at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub external_id: String,
    pub secondary_code: String,
    pub runtime: String,
    pub rating: String,
    pub box_number: Option<u32>,
    pub original_index: usize,
}

impl ViewModel {
    /// Title as rendered; empty titles display as "(Untitled)".
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// External title page for this entry, when it carries an external id.
    pub fn external_url(&self) -> Option<String> {
        if self.external_id.is_empty() {
            None
        } else {
            Some(format!("{}{}/", EXTERNAL_TITLE_BASE, self.external_id))
        }
    }
}

/// Project a provider snapshot into view models, 1:1 and order-preserving.
///
/// Pure: no field of the input is interpreted beyond the defaulting and
/// coercion rules, and malformed values degrade to defaults rather than
/// erroring.
pub fn project(records: &[Value]) -> Vec<ViewModel> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| project_one(record, index))
        .collect()
}

fn project_one(record: &Value, index: usize) -> ViewModel {
    ViewModel {
        title: string_field(record, "title"),
        year: string_field(record, "year"),
        poster_url: poster_url(record),
        external_id: string_field(record, "external_id"),
        secondary_code: string_field(record, "secondary_code"),
        runtime: metadata_field(record, "runtime"),
        rating: metadata_field(record, "rating"),
        box_number: box_number(record),
        original_index: index,
    }
}

/// Strings pass through; numbers are stringified; everything else defaults.
fn string_field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Like [`string_field`], but the upstream "N/A" sentinel counts as absent.
fn metadata_field(record: &Value, key: &str) -> String {
    let value = string_field(record, key);
    if value == NOT_AVAILABLE {
        String::new()
    } else {
        value
    }
}

/// Upgrade an insecure poster URL to https, keeping the remainder verbatim;
/// absent or sentinel values fall back to the placeholder.
fn poster_url(record: &Value) -> String {
    let raw = match record.get("poster_url") {
        Some(Value::String(s)) if !s.is_empty() && s != NOT_AVAILABLE => s.clone(),
        _ => return PLACEHOLDER_POSTER.to_string(),
    };
    match raw.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => raw,
    }
}

/// Accept a non-negative integer or a string of decimal digits (no sign, no
/// decimal point, no surrounding whitespace). Anything else is absent.
fn box_number(record: &Value) -> Option<u32> {
    match record.get("box_number") {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => {
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}
