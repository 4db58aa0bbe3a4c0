//! Split fetched proxy records by their `liveness` flag.

use serde_json::{Map, Value};

/// A fetched proxy entry. The payload is opaque to this crate.
pub type ProxyRecord = Map<String, Value>;

pub const LIVENESS_KEY: &str = "liveness";
pub const SUB_KEY: &str = "sub";

/// Partition into `(checked, skipped)`.
///
/// `liveness` is removed from every record (missing means `true`). Records
/// with a false flag also lose `sub` and go to `skipped`. Non-object entries
/// are dropped.
pub fn partition(records: Vec<Value>) -> (Vec<ProxyRecord>, Vec<ProxyRecord>) {
    let mut checked = Vec::new();
    let mut skipped = Vec::new();

    for record in records {
        let Value::Object(mut record) = record else {
            continue;
        };

        let liveness = record.remove(LIVENESS_KEY).is_none_or(|v| truthy(&v));
        if liveness {
            checked.push(record);
        } else {
            record.remove(SUB_KEY);
            skipped.push(record);
        }
    }

    (checked, skipped)
}

/// JSON truthiness: `false`, `null`, `0`, `""` and empty containers are false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
