// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Dot-path helpers (`"user.profile.name"`) for props and resolved JSON.
//!
//! Setting a path creates missing intermediate maps and replaces
//! intermediate values that are not maps.

use serde_json::{Map, Value as JsonValue};

use crate::prop::{Prop, Props};

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Inserts `value` into a props map at a dotted path.
pub fn set_prop_path(props: &mut Props, path: &str, value: Prop) {
    let mut segments: Vec<&str> = path.split(SEPARATOR).collect();
    let last = segments.pop().unwrap_or_default();
    let mut current = props;

    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Prop::Map(Props::new()));
        if !matches!(entry, Prop::Map(_)) {
            *entry = Prop::Map(Props::new());
        }
        current = match entry {
            Prop::Map(map) => map,
            _ => return,
        };
    }

    current.insert(last.to_string(), value);
}

/// Inserts `value` into a JSON object at a dotted path.
pub fn set_value_path(map: &mut Map<String, JsonValue>, path: &str, value: JsonValue) {
    let mut segments: Vec<&str> = path.split(SEPARATOR).collect();
    let last = segments.pop().unwrap_or_default();
    let mut current = map;

    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        if !entry.is_object() {
            *entry = JsonValue::Object(Map::new());
        }
        current = match entry {
            JsonValue::Object(map) => map,
            _ => return,
        };
    }

    current.insert(last.to_string(), value);
}

/// Looks up a dotted path in a JSON object.
///
/// An exact key match wins over path traversal, so a literal `"a.b"` key is
/// still reachable.
pub fn get_value_path<'a>(map: &'a Map<String, JsonValue>, path: &str) -> Option<&'a JsonValue> {
    if let Some(value) = map.get(path) {
        return Some(value);
    }

    let mut segments = path.split(SEPARATOR);
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_value_path_creates_maps() {
        let mut map = Map::new();
        set_value_path(&mut map, "a.b.c", json!(1));
        assert_eq!(JsonValue::Object(map), json!({ "a": { "b": { "c": 1 } } }));
    }

    #[test]
    fn test_set_value_path_replaces_scalars() {
        let mut map = json!({ "a": 5 }).as_object().cloned().unwrap();
        set_value_path(&mut map, "a.b", json!(true));
        assert_eq!(JsonValue::Object(map), json!({ "a": { "b": true } }));
    }

    #[test]
    fn test_set_value_path_merges_into_existing() {
        let mut map = json!({ "a": { "x": 1 } }).as_object().cloned().unwrap();
        set_value_path(&mut map, "a.y", json!(2));
        assert_eq!(JsonValue::Object(map), json!({ "a": { "x": 1, "y": 2 } }));
    }

    #[test]
    fn test_set_prop_path() {
        let mut props = Props::new();
        set_prop_path(&mut props, "auth.user", Prop::from("ada"));
        let auth = props.get("auth").and_then(Prop::as_map).unwrap();
        assert!(matches!(auth.get("user"), Some(Prop::Plain(v)) if v == "ada"));
    }

    #[test]
    fn test_get_value_path() {
        let map = json!({ "a": { "b": 1 }, "c.d": 2 }).as_object().cloned().unwrap();
        assert_eq!(get_value_path(&map, "a.b"), Some(&json!(1)));
        assert_eq!(get_value_path(&map, "c.d"), Some(&json!(2)));
        assert_eq!(get_value_path(&map, "a.x"), None);
        assert_eq!(get_value_path(&map, "a.b.c"), None);
    }
}
