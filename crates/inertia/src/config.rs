// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Inertia configuration.
//!
//! Usually loaded from `inertia.toml`.
//!
//! # Example Configuration
//!
//! ```toml
//! root_view = "app"
//! public_dir = "public"
//! asset_url = "https://cdn.example.com"
//! manifests = ["mix-manifest.json", "build/manifest.json"]
//! views_dir = "views"
//!
//! [ssr]
//! enabled = true
//! url = "http://127.0.0.1:13714/render"
//! bundle = "bootstrap/ssr/ssr.mjs"
//! timeout_ms = 5000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Default address of the SSR render service.
pub const DEFAULT_SSR_URL: &str = "http://127.0.0.1:13714/render";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InertiaConfig {
    /// Root template used for full page loads (default: "app").
    #[serde(default = "default_root_view")]
    pub root_view: String,

    /// Directory holding built assets and manifests (default: "public").
    #[serde(default = "default_public_dir")]
    pub public_dir: String,

    /// Asset host; its hash is the asset version when no manifest exists.
    #[serde(default)]
    pub asset_url: Option<String>,

    /// Manifest candidates relative to `public_dir`, first match wins.
    #[serde(default = "default_manifests")]
    pub manifests: Vec<String>,

    /// Directory containing root templates (default: "views").
    #[serde(default = "default_views_dir")]
    pub views_dir: String,

    /// Server-side rendering settings.
    #[serde(default)]
    pub ssr: SsrConfig,
}

/// Server-side rendering configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SsrConfig {
    /// Whether pages are sent to the render service (default: false).
    #[serde(default)]
    pub enabled: bool,

    /// Render service endpoint.
    #[serde(default = "default_ssr_url")]
    pub url: String,

    /// SSR bundle path, for the render service's own startup.
    #[serde(default)]
    pub bundle: Option<PathBuf>,

    /// Upper bound on a render call in milliseconds (default: 5000).
    #[serde(default = "default_ssr_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_root_view() -> String {
    "app".to_string()
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_manifests() -> Vec<String> {
    vec![
        "mix-manifest.json".to_string(),
        "build/manifest.json".to_string(),
    ]
}

fn default_views_dir() -> String {
    "views".to_string()
}

fn default_ssr_url() -> String {
    DEFAULT_SSR_URL.to_string()
}

fn default_ssr_timeout_ms() -> u64 {
    5000
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            root_view: default_root_view(),
            public_dir: default_public_dir(),
            asset_url: None,
            manifests: default_manifests(),
            views_dir: default_views_dir(),
            ssr: SsrConfig::default(),
        }
    }
}

impl Default for SsrConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_ssr_url(),
            bundle: None,
            timeout_ms: default_ssr_timeout_ms(),
        }
    }
}

impl InertiaConfig {
    /// Parses configuration from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Loads configuration from a TOML file.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
