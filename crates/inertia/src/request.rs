// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP request abstraction for the Inertia engine.
//!
//! This module provides a platform-agnostic request type that adapters
//! (axum, tests, other servers) build from their native request and hand to
//! the middleware and page builder.

use std::collections::HashMap;
use std::fmt;

use crate::headers::{
    REFERER, X_INERTIA, X_INERTIA_ERROR_BAG, X_INERTIA_PARTIAL_COMPONENT,
    X_INERTIA_PARTIAL_DATA, X_INERTIA_VERSION,
};
use crate::session::Session;

/// A named request predicate, installed by the middleware.
pub type Detector = fn(&InertiaRequest) -> bool;

/// A platform-agnostic HTTP request.
///
/// Header names are stored lowercased, so lookups are case-insensitive.
///
/// # Example
///
/// ```rust
/// use inertia::InertiaRequest;
///
/// let request = InertiaRequest::new("GET", "http://localhost/users?page=2")
///     .with_header("X-Inertia", "true");
/// assert!(request.is_inertia());
/// ```
#[derive(Clone)]
pub struct InertiaRequest {
    /// The HTTP method, uppercased (e.g., "GET", "PUT")
    pub method: String,

    /// The full request URL, including the query string
    pub url: String,

    headers: HashMap<String, String>,
    session: Option<Session>,
    detectors: HashMap<String, Detector>,
}

impl InertiaRequest {
    /// Creates a new request with the given method and URL.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            url: url.into(),
            headers: HashMap::new(),
            session: None,
            detectors: HashMap::new(),
        }
    }

    /// Adds a header to the request.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Adds headers to the request.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            self.set_header(name, value);
        }
        self
    }

    /// Attaches the session for this request.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets a header, replacing any previous value.
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Returns a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Returns true if the header is present, even when empty.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }

    /// All headers, keyed by lowercased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// The session, if the host attached one.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Mutable access to the session, creating an empty one if needed.
    pub fn session_mut(&mut self) -> &mut Session {
        self.session.get_or_insert_with(Session::new)
    }

    /// Returns true if the request method matches, ignoring case.
    pub fn is_method(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }

    /// Checks if this is an Inertia visit (`X-Inertia` header present).
    pub fn is_inertia(&self) -> bool {
        self.has_header(X_INERTIA)
    }

    /// The asset version declared by the client, or `""` when absent.
    pub fn client_version(&self) -> &str {
        self.header(X_INERTIA_VERSION).unwrap_or("")
    }

    /// The component named by a partial reload.
    pub fn partial_component(&self) -> Option<&str> {
        self.header(X_INERTIA_PARTIAL_COMPONENT)
    }

    /// The prop keys requested by a partial reload.
    ///
    /// Entries are trimmed and empty entries dropped, so `"a,,b "` yields
    /// `["a", "b"]`.
    pub fn partial_data(&self) -> Vec<String> {
        self.header(X_INERTIA_PARTIAL_DATA)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The error bag requested by the client.
    pub fn error_bag(&self) -> Option<&str> {
        self.header(X_INERTIA_ERROR_BAG).filter(|bag| !bag.is_empty())
    }

    /// The referring page, if the client sent one.
    pub fn referer(&self) -> Option<&str> {
        self.header(REFERER)
    }

    /// Registers a named detector for later use with [`InertiaRequest::is`].
    pub fn add_detector(&mut self, name: impl Into<String>, detector: Detector) {
        self.detectors.insert(name.into(), detector);
    }

    /// Evaluates a named detector. Unknown names are false.
    pub fn is(&self, name: &str) -> bool {
        self.detectors
            .get(name)
            .map(|detector| detector(self))
            .unwrap_or(false)
    }
}

impl fmt::Debug for InertiaRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut detectors: Vec<&String> = self.detectors.keys().collect();
        detectors.sort();
        f.debug_struct("InertiaRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("session", &self.session)
            .field("detectors", &detectors)
            .finish()
    }
}

impl Default for InertiaRequest {
    fn default() -> Self {
        Self::new("GET", "/")
    }
}
