// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the Inertia protocol engine.
//!
//! This module defines [`InertiaError`], the main error enum.
//!
//! # Error Categories
//!
//! - **Prop resolution errors**: a lazy or async prop failed while building a page
//! - **View errors**: the root template could not be found or rendered
//! - **Serialization errors**: the page object could not be encoded
//! - **Configuration errors**: `inertia.toml` could not be read or parsed
//!
//! Some failures are deliberately *not* errors: an unreachable SSR renderer,
//! a missing asset manifest and a missing session all degrade to a sensible
//! default instead of failing the request.

use thiserror::Error;

/// Boxed error returned by fallible prop producers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for Inertia operations.
#[derive(Error, Debug)]
pub enum InertiaError {
    /// A lazy or awaitable prop failed while the page was being resolved.
    ///
    /// There is no partial-page fallback: the whole response fails.
    #[error("Failed to resolve prop '{key}': {source}")]
    PropResolution {
        /// Dotted path of the prop that failed.
        key: String,
        /// The producer's error.
        #[source]
        source: BoxError,
    },

    /// The root template does not exist.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// The root template could not be rendered.
    #[error("View error: {0}")]
    View(String),

    /// JSON encoding of the page object failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl InertiaError {
    /// Wraps a producer failure for the prop at `key`.
    pub fn prop(key: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::PropResolution {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Returns true if this error came from resolving a prop.
    pub fn is_prop_resolution(&self) -> bool {
        matches!(self, Self::PropResolution { .. })
    }
}

/// Convenience type alias for Results with [`InertiaError`].
pub type Result<T> = std::result::Result<T, InertiaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_error_names_key() {
        let err = InertiaError::prop("user.name", "database offline");
        assert!(err.is_prop_resolution());
        assert_eq!(
            err.to_string(),
            "Failed to resolve prop 'user.name': database offline"
        );
    }

    #[test]
    fn test_template_not_found_message() {
        let err = InertiaError::TemplateNotFound("app".to_string());
        assert!(!err.is_prop_resolution());
        assert_eq!(err.to_string(), "Template not found: app");
    }
}
