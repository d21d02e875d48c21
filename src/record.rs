//! Input records and category-tagged row batches.
//!
//! Records arrive from spreadsheet-like sources, so the anchor key may be an
//! integer, an integral float or a numeric string, and the ranking column may
//! be text or a bare number. Everything else on a row is carried through
//! untouched as `attributes`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geodata::AnchorKey;

/// One input item anchored to an administrative region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "anchor_key_lenient")]
    pub anchor_key: AnchorKey,
    pub category: String,
    #[serde(default, deserialize_with = "ranking_text_lenient")]
    pub ranking_text: String,
    /// Passthrough display fields (names, counts, ...).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Record {
    pub fn new(anchor_key: AnchorKey, category: impl Into<String>, ranking_text: impl Into<String>) -> Self {
        Self {
            anchor_key,
            category: category.into(),
            ranking_text: ranking_text.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// A row from a source table that has not been tagged with a category yet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordRow {
    #[serde(deserialize_with = "anchor_key_lenient")]
    pub anchor_key: AnchorKey,
    #[serde(default, deserialize_with = "ranking_text_lenient")]
    pub ranking_text: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// All rows of one source table, tagged with the category they belong to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordBatch {
    pub category: String,
    #[serde(default)]
    pub rows: Vec<RecordRow>,
}

impl RecordBatch {
    pub fn into_records(self) -> impl Iterator<Item = Record> {
        let category = self.category;
        self.rows.into_iter().map(move |row| Record {
            anchor_key: row.anchor_key,
            category: category.clone(),
            ranking_text: row.ranking_text,
            attributes: row.attributes,
        })
    }
}

/// Concatenate batches in order, tagging every row with its batch category.
pub fn concat_batches(batches: Vec<RecordBatch>) -> Vec<Record> {
    batches.into_iter().flat_map(RecordBatch::into_records).collect()
}

pub(crate) fn anchor_key_lenient<'de, D>(deserializer: D) -> Result<AnchorKey, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    anchor_key_from_value(&value)
        .ok_or_else(|| de::Error::custom(format!("anchor_key must be an integer region code, got {}", value)))
}

fn anchor_key_from_value(value: &Value) -> Option<AnchorKey> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_f64))
        }
        _ => None,
    }
}

fn integral_f64(v: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; stay strictly inside the range.
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e18 {
        Some(v as i64)
    } else {
        None
    }
}

fn ranking_text_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("ranking_text must be text or a number, got {}", other))),
    }
}
