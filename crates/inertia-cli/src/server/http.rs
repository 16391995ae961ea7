// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP server for configured pages.
//!
//! Pages declared in `inertia.toml` are served through the protocol layer;
//! the public directory is served as-is under `/public`, outside the layer.

use std::sync::Arc;

use axum::{
    extract::State,
    http::Uri,
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Response},
    Extension, Router,
};
use inertia::prop::props_from_json;
use inertia::{error_props, Context, Inertia, InertiaRequest, Middleware, MiddlewareHooks, Props};
use serde_json::{Map, Value as JsonValue};
use tower_http::services::ServeDir;

use super::adapter::{inertia_layer, respond};
use crate::config::Config;

/// Hooks sharing the `[shared]` table with every page.
#[derive(Debug, Clone, Default)]
pub struct ConfigHooks {
    shared: Map<String, JsonValue>,
}

impl ConfigHooks {
    /// Creates hooks sharing `shared`.
    pub fn new(shared: Map<String, JsonValue>) -> Self {
        Self { shared }
    }
}

impl MiddlewareHooks for ConfigHooks {
    fn share(&self, request: &InertiaRequest) -> Props {
        let mut props = error_props(request);
        props.extend(props_from_json(self.shared.clone()));
        props
    }
}

/// Builds the application router.
pub fn build_router(config: Config) -> Router {
    let public_dir = config.inertia.public_dir.clone();
    let inertia = Inertia::new(config.inertia.clone());
    let middleware = Middleware::with_hooks(inertia, ConfigHooks::new(config.shared.clone()));

    let pages = Router::new()
        .fallback(page_handler)
        .with_state(Arc::new(config))
        .layer(from_fn_with_state(middleware, inertia_layer::<ConfigHooks>));

    Router::new()
        .nest_service("/public", ServeDir::new(public_dir))
        .fallback_service(pages)
}

/// Creates and starts the HTTP server.
pub async fn create_server(addr: &str, config: Config) -> anyhow::Result<()> {
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn page_handler(
    State(config): State<Arc<Config>>,
    Extension(ctx): Extension<Context>,
    uri: Uri,
) -> Response {
    let Some(page) = config.pages.get(uri.path()) else {
        tracing::debug!(path = uri.path(), "No page configured");
        return not_found(uri.path());
    };

    let mut response = ctx
        .render(page.component.clone(), props_from_json(page.props.clone()))
        .with_view_data_map(page.view_data.clone());
    if let Some(root_view) = &page.root_view {
        response = response.root_view(root_view.clone());
    }

    match respond(&ctx, response).await {
        Ok(response) => response.into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

fn not_found(path: &str) -> Response {
    let body = Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Not Found</title></head>\n<body><h1>Not Found</h1><p>{}</p></body>\n</html>",
        html_escape(path)
    ));
    (axum::http::StatusCode::NOT_FOUND, body).into_response()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
