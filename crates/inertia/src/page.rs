// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Page objects and the page response builder.
//!
//! A [`PageResponse`] is what a handler returns: a component name plus
//! props, not yet resolved. Converting it with
//! [`PageResponse::into_response`] filters props for partial reloads,
//! resolves them, and emits either the JSON page (Inertia visits) or a full
//! HTML document (first load), optionally pre-rendered by the SSR gateway.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::app::Inertia;
use crate::error::Result;
use crate::headers::{CONTENT_TYPE, VARY, X_INERTIA};
use crate::partial::filter_partial;
use crate::prop::{Prop, Props};
use crate::request::InertiaRequest;
use crate::resolve::resolve_props;
use crate::response::HttpResponse;
use crate::view::{PAGE_KEY, RESERVED_KEYS, SSR_BODY_KEY, SSR_HEAD_KEY};

/// The protocol's unit of response data.
///
/// Serializes to exactly `{"component", "props", "url", "version"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Client-side component to render.
    pub component: String,
    /// Fully resolved props.
    pub props: Map<String, JsonValue>,
    /// Full URL of the request that produced the page.
    pub url: String,
    /// Asset version; empty when undetermined.
    pub version: String,
}

/// Builder for a page response.
///
/// # Example
///
/// ```rust,ignore
/// let page = ctx
///     .render("Users/Index", Props::new())
///     .with("users", Prop::lazy(|| load_users()))
///     .with_view_data("title", "Users")
///     .root_view("admin");
/// let response = page.into_response(&ctx.request, &ctx.inertia).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PageResponse {
    component: String,
    props: Props,
    root_view: String,
    version: String,
    view_data: Map<String, JsonValue>,
}

impl PageResponse {
    /// Creates a page response.
    ///
    /// Usually obtained from [`Factory::render`](crate::Factory::render),
    /// which merges shared props and supplies the root view and version.
    pub fn new(
        component: impl Into<String>,
        props: Props,
        root_view: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            props,
            root_view: root_view.into(),
            version: version.into(),
            view_data: Map::new(),
        }
    }

    /// Adds or replaces a top-level prop.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Prop>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Merges top-level props, later values winning.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props.extend(props);
        self
    }

    /// Adds data visible only to the root template.
    ///
    /// The keys `page`, `ssr_head` and `ssr_body` belong to the page
    /// builder; view data under those names is dropped at render time.
    pub fn with_view_data(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.view_data.insert(key.into(), value.into());
        self
    }

    /// Merges data visible only to the root template.
    pub fn with_view_data_map(mut self, data: Map<String, JsonValue>) -> Self {
        self.view_data.extend(data);
        self
    }

    /// Overrides the root template for this response.
    pub fn root_view(mut self, name: impl Into<String>) -> Self {
        self.root_view = name.into();
        self
    }

    /// The component name.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// The unresolved props.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// The root template name.
    pub fn view(&self) -> &str {
        &self.root_view
    }

    /// The asset version captured at construction.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Data for the root template.
    pub fn view_data(&self) -> &Map<String, JsonValue> {
        &self.view_data
    }

    /// Builds the page object for `request`.
    ///
    /// Partial-reload filtering runs before resolution, so lazy props that
    /// were not requested are never invoked.
    pub async fn page(&self, request: &InertiaRequest) -> Result<Page> {
        let selected = filter_partial(self.props.clone(), &self.component, request);
        let props = resolve_props(selected, true).await?;

        Ok(Page {
            component: self.component.clone(),
            props,
            url: request.url.clone(),
            version: self.version.clone(),
        })
    }

    /// Converts the builder into an HTTP response.
    ///
    /// # Errors
    ///
    /// Fails if a prop fails to resolve or the root template cannot be
    /// rendered. SSR problems never fail the response.
    pub async fn into_response(self, request: &InertiaRequest, inertia: &Inertia) -> Result<HttpResponse> {
        let page = self.page(request).await?;

        if request.is_inertia() {
            tracing::debug!(component = %page.component, url = %page.url, "Responding with JSON page");
            return Ok(HttpResponse::json(200, serde_json::to_value(&page)?)
                .with_header(VARY, X_INERTIA)
                .with_header(X_INERTIA, "true")
                .with_header(CONTENT_TYPE, "application/json"));
        }

        let mut context = self.view_data;
        for key in RESERVED_KEYS {
            if context.remove(key).is_some() {
                tracing::warn!(key, "Ignoring view data under a reserved key");
            }
        }
        if let Some(ssr) = inertia.gateway().dispatch(&page).await {
            context.insert(SSR_HEAD_KEY.to_string(), JsonValue::String(ssr.head));
            context.insert(SSR_BODY_KEY.to_string(), JsonValue::String(ssr.body));
        }
        context.insert(PAGE_KEY.to_string(), serde_json::to_value(&page)?);

        tracing::debug!(component = %page.component, view = %self.root_view, "Rendering root template");
        let html = inertia.views().render(&self.root_view, &context)?;

        Ok(HttpResponse::html(200, html).with_header(CONTENT_TYPE, "text/html; charset=utf-8"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssr::{DisabledGateway, Gateway, SsrResponse};
    use crate::view::ShellRenderer;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StaticGateway;

    #[async_trait]
    impl Gateway for StaticGateway {
        async fn dispatch(&self, page: &Page) -> Option<SsrResponse> {
            Some(SsrResponse {
                head: "<title>SSR</title>".to_string(),
                body: format!("<div id=\"app\">{}</div>", page.component),
            })
        }
    }

    fn services() -> Inertia {
        Inertia::default()
            .with_gateway(DisabledGateway)
            .with_views(ShellRenderer::new())
    }

    fn builder() -> PageResponse {
        PageResponse::new("Users/Index", Props::new(), "app", "v1")
    }

    #[tokio::test]
    async fn test_json_page_for_inertia_request() {
        let request = InertiaRequest::new("GET", "http://localhost/users").with_header("X-Inertia", "true");
        let response = builder()
            .with("users", json!(["ada"]))
            .with("filters.role", "admin")
            .into_response(&request, &services())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.header("X-Inertia"), Some("true"));
        assert_eq!(response.header("Vary"), Some("X-Inertia"));
        assert_eq!(response.header("Content-Type"), Some("application/json"));

        let body = match response.body {
            crate::response::ResponseBody::Json(body) => body,
            other => panic!("Expected JSON body, got {other:?}"),
        };
        assert_eq!(
            body,
            json!({
                "component": "Users/Index",
                "props": { "users": ["ada"], "filters": { "role": "admin" } },
                "url": "http://localhost/users",
                "version": "v1",
            })
        );
        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["component", "props", "url", "version"]);
    }

    #[tokio::test]
    async fn test_html_document_for_first_visit() {
        let request = InertiaRequest::new("GET", "http://localhost/users");
        let response = builder()
            .with("count", 2)
            .with_view_data("title", "Users")
            .into_response(&request, &services())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.header("content-type"), Some("text/html; charset=utf-8"));
        assert!(response.header("X-Inertia").is_none());
        let html = response.body.to_text();
        assert!(html.contains("data-page=\"{&quot;component&quot;:&quot;Users/Index&quot;"));
        assert!(html.contains("&quot;count&quot;:2"));
        assert!(!html.contains("&quot;title&quot;"));
    }

    #[tokio::test]
    async fn test_ssr_output_used_for_document() {
        let request = InertiaRequest::new("GET", "http://localhost/users");
        let inertia = services().with_gateway(StaticGateway);
        let html = builder()
            .into_response(&request, &inertia)
            .await
            .unwrap()
            .body
            .to_text();

        assert!(html.contains("<title>SSR</title>"));
        assert!(html.contains("<div id=\"app\">Users/Index</div>"));
        assert!(!html.contains("data-page"));
    }

    #[tokio::test]
    async fn test_reserved_view_data_keys_ignored() {
        let request = InertiaRequest::new("GET", "http://localhost/users");
        let html = builder()
            .with_view_data("ssr_body", "<p>not ssr</p>")
            .with_view_data("ssr_head", "<title>not ssr</title>")
            .with_view_data("page", "not a page")
            .into_response(&request, &services())
            .await
            .unwrap()
            .body
            .to_text();

        assert!(html.contains("data-page=\"{&quot;component&quot;:&quot;Users/Index&quot;"));
        assert!(!html.contains("not ssr"));
    }

    #[tokio::test]
    async fn test_root_view_override() {
        let request = InertiaRequest::new("GET", "http://localhost/");
        let inertia = services().with_views(
            ShellRenderer::new().with_template("admin", "<admin>%inertia.body%</admin>"),
        );
        let html = builder()
            .root_view("admin")
            .into_response(&request, &inertia)
            .await
            .unwrap()
            .body
            .to_text();
        assert!(html.starts_with("<admin><div id=\"app\""));
    }

    #[tokio::test]
    async fn test_partial_reload_skips_unrequested_lazy_props() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let request = InertiaRequest::new("GET", "http://localhost/users")
            .with_header("X-Inertia", "true")
            .with_header("X-Inertia-Partial-Component", "Users/Index")
            .with_header("X-Inertia-Partial-Data", "users");

        let page = builder()
            .with("users", Prop::lazy(|| json!(["ada"])))
            .with(
                "stats",
                Prop::lazy(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    json!({ "total": 1 })
                }),
            )
            .page(&request)
            .await
            .unwrap();

        assert_eq!(JsonValue::Object(page.props), json!({ "users": ["ada"] }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_prop_fails_response() {
        let request = InertiaRequest::new("GET", "http://localhost/").with_header("X-Inertia", "true");
        let err = builder()
            .with("broken", Prop::try_awaitable(|| async { Err::<i32, _>("backend down") }))
            .into_response(&request, &services())
            .await
            .unwrap_err();
        assert!(err.is_prop_resolution());
    }
}
