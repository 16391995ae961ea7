// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project configuration.
//!
//! Configuration is loaded from `inertia.toml` at the project root.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [inertia]
//! root_view = "app"
//! public_dir = "public"
//!
//! [inertia.ssr]
//! enabled = true
//!
//! [shared]
//! app_name = "Acme"
//!
//! [pages."/"]
//! component = "Home"
//! props = { greeting = "Hello" }
//!
//! [pages."/about"]
//! component = "About"
//! view_data = { title = "About us" }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use inertia::InertiaConfig;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "inertia.toml";

/// Main configuration structure loaded from `inertia.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Engine settings.
    #[serde(default)]
    pub inertia: InertiaConfig,
    /// Props shared with every page.
    #[serde(default)]
    pub shared: Map<String, JsonValue>,
    /// Pages served by path.
    #[serde(default)]
    pub pages: HashMap<String, PageConfig>,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server host (default: "127.0.0.1").
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port (default: 3000).
    #[serde(default = "default_port")]
    pub port: u16,
}

/// A page served at a fixed path.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    /// Client-side component.
    pub component: String,
    /// Page props. Dotted keys are expanded.
    #[serde(default)]
    pub props: Map<String, JsonValue>,
    /// Root template override.
    #[serde(default)]
    pub root_view: Option<String>,
    /// Data for the root template only.
    #[serde(default)]
    pub view_data: Map<String, JsonValue>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Loads configuration from `inertia.toml` in the current directory.
    ///
    /// If no configuration file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Loads configuration from `path`, with the same fallback as [`Config::load`].
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("inertia.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.inertia, InertiaConfig::default());
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
[server]
port = 8080

[inertia]
root_view = "shell"

[inertia.ssr]
enabled = true
timeout_ms = 250

[shared]
app_name = "Acme"

[pages."/"]
component = "Home"
props = { greeting = "Hello", "user.name" = "ada" }

[pages."/about"]
component = "About"
root_view = "plain"
view_data = { title = "About us" }
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.inertia.root_view, "shell");
        assert!(config.inertia.ssr.enabled);
        assert_eq!(config.inertia.ssr.timeout_ms, 250);
        assert_eq!(config.shared.get("app_name"), Some(&json!("Acme")));

        let home = &config.pages["/"];
        assert_eq!(home.component, "Home");
        assert_eq!(home.props.get("user.name"), Some(&json!("ada")));
        assert_eq!(home.root_view, None);

        let about = &config.pages["/about"];
        assert_eq!(about.root_view.as_deref(), Some("plain"));
        assert_eq!(about.view_data.get("title"), Some(&json!("About us")));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inertia.toml");
        fs::write(&path, "[server]\nport = \"not a number\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
