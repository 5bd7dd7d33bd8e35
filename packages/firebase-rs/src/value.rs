//! Mapping between plain JSON and Firestore's typed value encoding.
//!
//! Firestore's REST API wraps every field in a type tag
//! (`{"stringValue": "x"}`, `{"integerValue": "42"}`, ...). The rest of the
//! workspace works with ordinary `serde_json::Value`s; these two functions
//! translate at the wire boundary.

use serde_json::{json, Map, Value};

/// Encode a JSON object into Firestore `fields`.
///
/// Floats become `doubleValue`, whole numbers `integerValue` (Firestore
/// transmits integers as strings). Nested objects and arrays are encoded
/// recursively.
pub fn to_firestore_fields(doc: &Map<String, Value>) -> Value {
    let fields: Map<String, Value> = doc
        .iter()
        .map(|(k, v)| (k.clone(), to_firestore_value(v)))
        .collect();
    Value::Object(fields)
}

fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": {
                "values": items.iter().map(to_firestore_value).collect::<Vec<_>>(),
            }
        }),
        Value::Object(map) => json!({
            "mapValue": { "fields": to_firestore_fields(map) }
        }),
    }
}

/// Decode Firestore `fields` back into a plain JSON object.
pub fn from_firestore_fields(fields: &Value) -> Map<String, Value> {
    fields
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), from_firestore_value(v)))
                .collect()
        })
        .unwrap_or_default()
}

fn from_firestore_value(value: &Value) -> Value {
    let Some(map) = value.as_object() else {
        return Value::Null;
    };
    if let Some(s) = map.get("stringValue") {
        return s.clone();
    }
    if let Some(b) = map.get("booleanValue") {
        return b.clone();
    }
    if let Some(i) = map.get("integerValue") {
        return i
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or(Value::Null);
    }
    if let Some(d) = map.get("doubleValue") {
        return d.clone();
    }
    if let Some(ts) = map.get("timestampValue") {
        return ts.clone();
    }
    if let Some(arr) = map.get("arrayValue") {
        let items = arr
            .get("values")
            .and_then(|v| v.as_array())
            .map(|values| values.iter().map(from_firestore_value).collect())
            .unwrap_or_default();
        return Value::Array(items);
    }
    if let Some(inner) = map.get("mapValue") {
        let fields = inner.get("fields").cloned().unwrap_or(Value::Null);
        return Value::Object(from_firestore_fields(&fields));
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_scalars_arrays_and_maps() {
        let doc = json!({
            "name": "Asha",
            "age": 29,
            "active": true,
            "state": null,
            "skills": ["rust", "public speaking"],
            "nested": { "a": 1 },
        });
        let fields = to_firestore_fields(doc.as_object().unwrap());
        let back = Value::Object(from_firestore_fields(&fields));
        assert_eq!(back, doc);
    }

    #[test]
    fn integers_are_encoded_as_strings() {
        let doc = json!({ "age": 42 });
        let fields = to_firestore_fields(doc.as_object().unwrap());
        assert_eq!(fields["age"]["integerValue"], json!("42"));
    }
}
