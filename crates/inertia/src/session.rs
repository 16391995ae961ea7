// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Request-scoped session data handed over by the host application.
//!
//! The engine only reads the `errors` entry (validation errors keyed by
//! error bag) and records the previous URL on location visits. Everything
//! else is opaque.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

const ERRORS_KEY: &str = "errors";
const PREVIOUS_URL_KEY: &str = "_previous_url";

/// Session values for a single request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    values: Map<String, JsonValue>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session from existing values.
    pub fn from_values(values: Map<String, JsonValue>) -> Self {
        Self { values }
    }

    /// Stores validation errors, keyed by error bag name.
    pub fn with_errors(mut self, errors: JsonValue) -> Self {
        self.put(ERRORS_KEY, errors);
        self
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    /// Returns true if a value is stored under `key`.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Stores a value.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes and returns a value.
    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.values.remove(key)
    }

    /// Validation errors flashed by the previous request, if any.
    pub fn errors(&self) -> Option<&JsonValue> {
        self.get(ERRORS_KEY)
    }

    /// The URL recorded by the last location visit.
    pub fn previous_url(&self) -> Option<&str> {
        self.get(PREVIOUS_URL_KEY).and_then(JsonValue::as_str)
    }

    /// Records the URL to return to.
    pub fn set_previous_url(&mut self, url: impl Into<String>) {
        self.put(PREVIOUS_URL_KEY, url.into());
    }

    /// All stored values.
    pub fn values(&self) -> &Map<String, JsonValue> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_errors_roundtrip() {
        let session = Session::new().with_errors(json!({ "default": { "name": "required" } }));
        assert!(session.has("errors"));
        assert_eq!(session.errors().unwrap()["default"]["name"], "required");
    }

    #[test]
    fn test_previous_url() {
        let mut session = Session::new();
        assert_eq!(session.previous_url(), None);
        session.set_previous_url("/users");
        assert_eq!(session.previous_url(), Some("/users"));
    }

    #[test]
    fn test_remove() {
        let mut session = Session::new();
        session.put("flash", "saved");
        assert_eq!(session.remove("flash"), Some(json!("saved")));
        assert!(!session.has("flash"));
    }
}
