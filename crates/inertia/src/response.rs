// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP response abstraction for the Inertia engine.
//!
//! This module provides a platform-agnostic response type produced by the
//! page builder and post-processed by the middleware. Adapters convert it
//! to and from their platform-specific response format.

use serde_json::Value as JsonValue;

use crate::headers::{LOCATION, X_INERTIA_LOCATION};
use crate::session::Session;

/// Body of an [`HttpResponse`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResponseBody {
    /// No body.
    #[default]
    Empty,
    /// Text body (HTML documents, plain text).
    Text(String),
    /// JSON body (Inertia page payloads).
    Json(JsonValue),
    /// Raw bytes passed through untouched (downloads, images, compressed
    /// bodies).
    Bytes(Vec<u8>),
}

impl ResponseBody {
    /// Returns true if there is nothing to send.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Json(_) => false,
            Self::Bytes(bytes) => bytes.is_empty(),
        }
    }

    /// Returns the body as a string. Bytes that are not UTF-8 are replaced.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Json(value) => value.to_string(),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Consumes the body, returning the bytes to send.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Empty => Vec::new(),
            Self::Text(text) => text.into_bytes(),
            Self::Json(value) => value.to_string().into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

/// A platform-agnostic HTTP response.
///
/// Header lookups and replacements ignore case. A header may appear more
/// than once (`Set-Cookie`), in the order it was added.
///
/// # Example
///
/// ```rust
/// use inertia::HttpResponse;
///
/// let html = HttpResponse::html(200, "<h1>Hello</h1>");
/// let visit = HttpResponse::location_visit("https://example.com/login");
/// assert_eq!(visit.status, 409);
/// assert_eq!(visit.header("x-inertia-location"), Some("https://example.com/login"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// HTTP headers, in order
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: ResponseBody,
    /// Session state changed while handling the request, for the host to
    /// persist.
    pub session: Option<Session>,
}

impl HttpResponse {
    /// Creates a response with the given status and no body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: ResponseBody::Empty,
            session: None,
        }
    }

    /// Creates a text/HTML response.
    pub fn html(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: ResponseBody::Text(body.into()),
            session: None,
        }
    }

    /// Creates a JSON response.
    pub fn json(status: u16, body: JsonValue) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: ResponseBody::Json(body),
            session: None,
        }
    }

    /// Creates a redirect response (HTTP 302 by default).
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::redirect_with_status(302, location)
    }

    /// Creates a redirect response with a specific status code.
    pub fn redirect_with_status(status: u16, location: impl Into<String>) -> Self {
        Self::empty(status).with_header(LOCATION, location)
    }

    /// Creates a forced location visit: status 409 with `X-Inertia-Location`.
    ///
    /// The client runtime answers this with a full browser navigation.
    pub fn location_visit(url: impl Into<String>) -> Self {
        Self::empty(409).with_header(X_INERTIA_LOCATION, url)
    }

    /// Creates a response carrying raw bytes.
    pub fn bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: ResponseBody::Bytes(body.into()),
            session: None,
        }
    }

    /// Returns the first value of a header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns every value of a header, in order.
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Sets a header, replacing every value stored under any casing.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Adds a header value, keeping existing values.
    pub fn append_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Adds a header to the response.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Attaches session state for the host to persist.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the response status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Returns true if this is a success response (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if this is a redirect response (3xx).
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Returns true if this is an error response (4xx or 5xx).
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}
