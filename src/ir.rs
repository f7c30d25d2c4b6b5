use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Read access to a schema-less item or group record.
///
/// Keys may address nested objects with dots, so `"meta.start"` reads
/// `record["meta"]["start"]`. A missing segment yields `None`.
pub trait Record {
    fn field(&self, key: &str) -> Option<&Value>;
}

impl Record for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.get(key) {
            return Some(value);
        }
        let (head, rest) = key.split_once('.')?;
        self.get(head)?.field(rest)
    }
}

impl Record for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.field(key),
            _ => None,
        }
    }
}

/// Reads a time value in milliseconds. Numeric strings are accepted since
/// timestamps often arrive quoted from JSON sources.
pub fn field_time<R: Record + ?Sized>(record: &R, key: &str) -> Option<f64> {
    match record.field(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads an identifier, normalizing numbers to their string form so that
/// `1` and `"1"` name the same group.
pub fn field_id<R: Record + ?Sized>(record: &R, key: &str) -> Option<String> {
    match record.field(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_id(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integral numbers print without a fraction so `1` and `1.0` name the same id.
fn number_id(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

pub fn field_bool<R: Record + ?Sized>(record: &R, key: &str) -> Option<bool> {
    record.field(key)?.as_bool()
}

/// Field names used to read items and groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemKeys {
    pub group_id_key: String,
    pub item_id_key: String,
    pub item_group_key: String,
    pub item_time_start_key: String,
    pub item_time_end_key: String,
    pub item_overlay_key: String,
}

impl Default for ItemKeys {
    fn default() -> Self {
        Self {
            group_id_key: "id".to_string(),
            item_id_key: "id".to_string(),
            item_group_key: "group".to_string(),
            item_time_start_key: "start_time".to_string(),
            item_time_end_key: "end_time".to_string(),
            item_overlay_key: "isOverlay".to_string(),
        }
    }
}
