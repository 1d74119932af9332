//! Response shape normalization for the read path. Never fails: unknown
//! shapes become an empty collection / no record.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extracts the row array from a list response. Tried in order:
/// `data.results`, `results`, `data`, the response itself.
pub fn normalize_list(response: Value) -> Vec<Value> {
    let mut response = response;
    let candidates = [
        response.pointer_mut("/data/results").map(Value::take),
        response.pointer_mut("/results").map(Value::take),
        response.pointer_mut("/data").map(Value::take),
    ];
    for candidate in candidates.into_iter().flatten() {
        if let Value::Array(rows) = candidate {
            return rows;
        }
    }
    match response {
        Value::Array(rows) => rows,
        _ => Vec::new(),
    }
}

/// Extracts a single record: `data` when it is an object, else the response.
pub fn normalize_record(response: Value) -> Option<Value> {
    match response {
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Object(_)) => Some(data),
            Some(other) => {
                map.insert("data".to_string(), other);
                Some(Value::Object(map))
            }
            None => Some(Value::Object(map)),
        },
        _ => None,
    }
}

/// Deserializes rows one by one; malformed rows are skipped with a warning.
pub fn decode_rows<T: DeserializeOwned>(entity: &str, rows: Vec<Value>) -> Vec<T> {
    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("{}: skipping row {} with unexpected shape: {}", entity, index, e);
                None
            }
        })
        .collect();
    if decoded.len() != total {
        log::debug!("{}: decoded {} of {} rows", entity, decoded.len(), total);
    }
    decoded
}

pub fn decode_record<T: DeserializeOwned>(entity: &str, response: Value) -> Option<T> {
    let record = normalize_record(response)?;
    match serde_json::from_value(record) {
        Ok(item) => Some(item),
        Err(e) => {
            log::warn!("{}: record with unexpected shape: {}", entity, e);
            None
        }
    }
}
