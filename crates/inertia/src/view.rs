// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Root template rendering for full page loads.
//!
//! [`ViewRenderer`] is the seam to a real template engine. [`ShellRenderer`]
//! is a minimal implementation that fills placeholders in an HTML shell:
//!
//! - `%inertia.head%`: SSR head fragment, or nothing
//! - `%inertia.body%`: SSR body, or the root element carrying the page JSON
//! - `%view.<key>%`: a string, number or boolean from the view data

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};

use crate::error::{InertiaError, Result};

/// Context key holding the page object.
pub const PAGE_KEY: &str = "page";
/// Context key holding the SSR head fragment.
pub const SSR_HEAD_KEY: &str = "ssr_head";
/// Context key holding the SSR body fragment.
pub const SSR_BODY_KEY: &str = "ssr_body";

/// Context keys owned by the page builder. View data cannot use them.
pub const RESERVED_KEYS: [&str; 3] = [PAGE_KEY, SSR_HEAD_KEY, SSR_BODY_KEY];

/// Renders a root template with view data.
pub trait ViewRenderer: Send + Sync {
    /// Renders the template `view` with `context`.
    fn render(&self, view: &str, context: &Map<String, JsonValue>) -> Result<String>;
}

/// Placeholder-substituting HTML shell renderer.
///
/// Templates are looked up in memory first, then as `<dir>/<view>.html`.
/// A built-in `app` shell is always available.
#[derive(Debug, Clone)]
pub struct ShellRenderer {
    templates: HashMap<String, String>,
    dir: Option<PathBuf>,
    root_id: String,
}

impl ShellRenderer {
    /// Creates a renderer with only the built-in `app` shell.
    pub fn new() -> Self {
        let mut templates = HashMap::new();
        templates.insert("app".to_string(), DEFAULT_APP_HTML.to_string());
        Self {
            templates,
            dir: None,
            root_id: "app".to_string(),
        }
    }

    /// Creates a renderer that also loads templates from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: Some(dir.as_ref().to_path_buf()),
            ..Self::new()
        }
    }

    /// Registers an in-memory template.
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(name.into(), source.into());
        self
    }

    /// Sets the id of the client-side root element (default: "app").
    pub fn with_root_id(mut self, id: impl Into<String>) -> Self {
        self.root_id = id.into();
        self
    }

    fn load(&self, view: &str) -> Result<String> {
        if let Some(dir) = &self.dir {
            let path = dir.join(format!("{}.html", view));
            if path.is_file() {
                return Ok(std::fs::read_to_string(path)?);
            }
        }

        self.templates
            .get(view)
            .cloned()
            .ok_or_else(|| InertiaError::TemplateNotFound(view.to_string()))
    }
}

impl Default for ShellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for ShellRenderer {
    fn render(&self, view: &str, context: &Map<String, JsonValue>) -> Result<String> {
        let template = self.load(view)?;

        let head = context
            .get(SSR_HEAD_KEY)
            .and_then(JsonValue::as_str)
            .map(head_fragment)
            .unwrap_or_default();

        let body = match context.get(SSR_BODY_KEY).and_then(JsonValue::as_str) {
            Some(ssr_body) => collapse_lines(ssr_body),
            None => {
                let page = context.get(PAGE_KEY).ok_or_else(|| {
                    InertiaError::View(format!("No page in context for view '{}'", view))
                })?;
                app_root(page, &self.root_id)
            }
        };

        Ok(fill(&template, |name| match name {
            "inertia.head" => Some(head.clone()),
            "inertia.body" => Some(body.clone()),
            _ => {
                let key = name.strip_prefix("view.")?;
                match context.get(key)? {
                    JsonValue::String(s) => Some(html_escape(s)),
                    JsonValue::Number(n) => Some(n.to_string()),
                    JsonValue::Bool(b) => Some(b.to_string()),
                    _ => None,
                }
            }
        }))
    }
}

/// Replaces `%name%` placeholders in one pass. Substituted text is never
/// scanned again; unknown placeholders are left as they are.
fn fill(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after
            .find('%')
            .and_then(|end| lookup(&after[..end]).map(|text| (end, text)));
        match replaced {
            Some((end, text)) => {
                out.push_str(&text);
                rest = &after[end + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// The client-side root element, with the page JSON in `data-page`.
///
/// Quotes around `id` are stripped; an empty id falls back to `app`.
pub fn app_root(page: &JsonValue, id: &str) -> String {
    let id = id.trim().trim_matches(|c| c == '\'' || c == '"' || c == '\\');
    let id = if id.is_empty() { "app" } else { id };
    format!(
        "<div id=\"{}\" data-page=\"{}\"></div>",
        html_escape(id),
        html_escape(&page.to_string())
    )
}

/// Head fragment as a single line.
pub fn head_fragment(head: &str) -> String {
    collapse_lines(head)
}

fn collapse_lines(markup: &str) -> String {
    markup
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Built-in root template.
const DEFAULT_APP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    %inertia.head%
</head>
<body>
    %inertia.body%
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_app_root_escapes_page() {
        let html = app_root(&json!({ "component": "Home", "props": { "q": "<b>" } }), "'app'");
        assert_eq!(
            html,
            "<div id=\"app\" data-page=\"{&quot;component&quot;:&quot;Home&quot;,&quot;props&quot;:{&quot;q&quot;:&quot;&lt;b&gt;&quot;}}\"></div>"
        );
    }

    #[test]
    fn test_app_root_empty_id() {
        assert!(app_root(&json!({}), "  ").starts_with("<div id=\"app\""));
    }

    #[test]
    fn test_local_render_embeds_page() {
        let renderer = ShellRenderer::new();
        let html = renderer
            .render("app", &context(json!({ "page": { "component": "Home" } })))
            .unwrap();
        assert!(html.contains("data-page=\"{&quot;component&quot;:&quot;Home&quot;}\""));
        assert!(!html.contains("%inertia"));
    }

    #[test]
    fn test_ssr_fragments_used_when_present() {
        let renderer = ShellRenderer::new();
        let html = renderer
            .render(
                "app",
                &context(json!({
                    "page": { "component": "Home" },
                    "ssr_head": "<title>Home</title>\n<meta name=\"a\">",
                    "ssr_body": "<div id=\"app\">\n  rendered\n</div>",
                })),
            )
            .unwrap();
        assert!(html.contains("<title>Home</title> <meta name=\"a\">"));
        assert!(html.contains("<div id=\"app\"> rendered </div>"));
        assert!(!html.contains("data-page"));
    }

    #[test]
    fn test_view_data_placeholders() {
        let renderer = ShellRenderer::new()
            .with_template("admin", "<title>%view.title%</title>%inertia.body%");
        let html = renderer
            .render("admin", &context(json!({ "title": "A & B", "page": {} })))
            .unwrap();
        assert!(html.starts_with("<title>A &amp; B</title><div id=\"app\""));
    }

    #[test]
    fn test_view_data_is_not_rescanned() {
        let renderer = ShellRenderer::new()
            .with_template("admin", "<title>%view.title%</title>%inertia.head%|%inertia.body%");
        let html = renderer
            .render(
                "admin",
                &context(json!({
                    "title": "%inertia.head% 100%",
                    "page": {},
                    "ssr_head": "<meta>",
                    "ssr_body": "<main></main>",
                })),
            )
            .unwrap();
        assert_eq!(html, "<title>%inertia.head% 100%</title><meta>|<main></main>");
    }

    #[test]
    fn test_unknown_placeholders_kept() {
        let renderer = ShellRenderer::new().with_template("t", "50% %view.missing% %inertia.body%");
        let html = renderer.render("t", &context(json!({ "page": {} }))).unwrap();
        assert!(html.starts_with("50% %view.missing% <div id=\"app\""));
    }

    #[test]
    fn test_unknown_template() {
        let err = ShellRenderer::new()
            .render("missing", &context(json!({ "page": {} })))
            .unwrap_err();
        assert!(matches!(err, InertiaError::TemplateNotFound(name) if name == "missing"));
    }

    #[test]
    fn test_templates_loaded_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.html"), "<main>%inertia.body%</main>").unwrap();
        let html = ShellRenderer::from_dir(dir.path())
            .with_root_id("root")
            .render("app", &context(json!({ "page": {} })))
            .unwrap();
        assert_eq!(html, "<main><div id=\"root\" data-page=\"{}\"></div></main>");
    }
}
