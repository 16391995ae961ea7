// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Protocol middleware.
//!
//! [`Middleware::process`] wraps a request handler:
//!
//! 1. seed a fresh [`Factory`] from [`MiddlewareHooks`]
//! 2. install the `inertia*` request detectors
//! 3. run the handler with a [`Context`]
//! 4. post-process the response: `Vary`, asset version mismatch, empty
//!    responses and redirect status coercion
//!
//! Applications customize steps 1 and 4 by implementing [`MiddlewareHooks`].

use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use crate::app::Inertia;
use crate::config::InertiaConfig;
use crate::error::Result;
use crate::factory::{AssetVersion, Factory};
use crate::headers::{
    VARY, X_INERTIA, X_INERTIA_PARTIAL_COMPONENT, X_INERTIA_PARTIAL_DATA,
};
use crate::page::PageResponse;
use crate::prop::{Prop, Props};
use crate::request::InertiaRequest;
use crate::response::HttpResponse;
use crate::session::Session;
use crate::version::detect_version;

/// Everything a handler needs for one request.
#[derive(Clone)]
pub struct Context {
    /// The incoming request, with detectors installed.
    pub request: InertiaRequest,
    /// Shared state seeded for this request. The middleware reads it back
    /// after the handler returns.
    pub factory: Factory,
    /// Application services.
    pub inertia: Inertia,
}

impl Context {
    /// Starts a page response carrying the shared props.
    pub fn render(&self, component: impl Into<String>, props: Props) -> PageResponse {
        self.factory.render(component, props)
    }

    /// Converts a page response for this request.
    pub async fn respond(&self, page: PageResponse) -> Result<HttpResponse> {
        page.into_response(&self.request, &self.inertia).await
    }
}

/// Customization points of the middleware.
///
/// Every method has a default; override the ones you need.
pub trait MiddlewareHooks: Send + Sync + 'static {
    /// The current asset version.
    ///
    /// Defaults to hashing the first existing manifest, then the
    /// configured asset URL. Computed on demand.
    fn version(&self, _request: &InertiaRequest, config: &InertiaConfig) -> AssetVersion {
        let config = config.clone();
        AssetVersion::lazy(move || detect_version(&config))
    }

    /// Props shared with every page by default.
    ///
    /// Overrides that still want validation errors can start from
    /// [`error_props`].
    fn share(&self, request: &InertiaRequest) -> Props {
        error_props(request)
    }

    /// The root template for first page visits.
    fn root_view(&self, _request: &InertiaRequest, config: &InertiaConfig) -> String {
        config.root_view.clone()
    }

    /// Replaces an empty `200` answer to an Inertia request.
    ///
    /// Defaults to a redirect back to the referring page.
    fn on_empty_response(&self, request: &InertiaRequest, _response: HttpResponse) -> HttpResponse {
        redirect_back(request)
    }

    /// Replaces the response when the client's asset version is stale.
    ///
    /// Defaults to a location visit to the current URL.
    fn on_version_change(&self, request: &InertiaRequest, _response: HttpResponse) -> HttpResponse {
        HttpResponse::location_visit(request.url.clone())
    }
}

/// The stock hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl MiddlewareHooks for DefaultHooks {}

/// The Inertia protocol middleware.
pub struct Middleware<H = DefaultHooks> {
    inertia: Inertia,
    hooks: Arc<H>,
}

impl<H> Clone for Middleware<H> {
    fn clone(&self) -> Self {
        Self {
            inertia: self.inertia.clone(),
            hooks: self.hooks.clone(),
        }
    }
}

impl Middleware<DefaultHooks> {
    /// Creates a middleware with the stock hooks.
    pub fn new(inertia: Inertia) -> Self {
        Self::with_hooks(inertia, DefaultHooks)
    }
}

impl<H: MiddlewareHooks> Middleware<H> {
    /// Creates a middleware with custom hooks.
    pub fn with_hooks(inertia: Inertia, hooks: H) -> Self {
        Self {
            inertia,
            hooks: Arc::new(hooks),
        }
    }

    /// Application services.
    pub fn inertia(&self) -> &Inertia {
        &self.inertia
    }

    /// The hooks in use.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// A fresh factory for `request`.
    pub fn seed(&self, request: &InertiaRequest) -> Factory {
        let config = self.inertia.config();
        let factory = Factory::new();
        factory.version(self.hooks.version(request, config));
        factory.share_many(self.hooks.share(request));
        factory.set_root_view(self.hooks.root_view(request, config));
        factory
    }

    /// Installs the `inertia`, `inertia-partial-component` and
    /// `inertia-partial-data` detectors.
    pub fn install_detectors(request: &mut InertiaRequest) {
        request.add_detector("inertia", |r| r.has_header(X_INERTIA));
        request.add_detector("inertia-partial-component", |r| {
            r.has_header(X_INERTIA_PARTIAL_COMPONENT)
        });
        request.add_detector("inertia-partial-data", |r| {
            r.has_header(X_INERTIA_PARTIAL_DATA)
        });
    }

    /// Runs `handler` for `request` and applies the protocol rules to its
    /// response.
    ///
    /// # Errors
    ///
    /// Handler errors are returned as they are.
    pub async fn process<F, Fut>(&self, mut request: InertiaRequest, handler: F) -> Result<HttpResponse>
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<HttpResponse>>,
    {
        Self::install_detectors(&mut request);
        let factory = self.seed(&request);

        let context = Context {
            request: request.clone(),
            factory: factory.clone(),
            inertia: self.inertia.clone(),
        };
        let response = handler(context).await?;

        Ok(self.finish(&request, &factory, response))
    }

    /// Applies the protocol rules to a handler response.
    ///
    /// The asset version is read from `factory` here, so a version set by
    /// the handler is the one the client is checked against.
    pub fn finish(&self, request: &InertiaRequest, factory: &Factory, response: HttpResponse) -> HttpResponse {
        let mut response = response.with_header(VARY, X_INERTIA);

        if !request.is_inertia() {
            return response;
        }

        let session = response.session.clone();

        if request.is_method("GET") {
            let server_version = factory.get_version();
            if request.client_version() != server_version {
                tracing::debug!(
                    client = request.client_version(),
                    server = %server_version,
                    url = %request.url,
                    "Asset version changed"
                );
                response = self.hooks.on_version_change(request, response);
            }
        }

        if response.status == 200 && response.body.is_empty() {
            tracing::debug!(url = %request.url, "Empty response, redirecting back");
            response = self.hooks.on_empty_response(request, response);
        }

        if response.status == 302
            && (request.is_method("PUT") || request.is_method("PATCH") || request.is_method("DELETE"))
        {
            response.status = 303;
        }

        if response.session.is_none() {
            response.session = session;
        }
        response.with_header(VARY, X_INERTIA)
    }
}

/// The `errors` prop, resolved lazily from the session.
pub fn error_props(request: &InertiaRequest) -> Props {
    let request = request.clone();
    let mut props = Props::new();
    props.insert(
        "errors".to_string(),
        Prop::lazy(move || JsonValue::Object(resolve_validation_errors(&request))),
    );
    props
}

/// A `302` back to the referring page.
///
/// Uses the `Referer` header, then the session's previous URL, then `/`.
pub fn redirect_back(request: &InertiaRequest) -> HttpResponse {
    let target = request
        .referer()
        .or_else(|| request.session().and_then(Session::previous_url))
        .unwrap_or("/");
    HttpResponse::redirect(target)
}

/// Validation errors for the current request.
///
/// The session stores errors keyed by bag name. A bag that is not an
/// object is treated as `{"default": value}`. When a `default` bag exists
/// it is returned on its own, or under the name given by
/// `X-Inertia-Error-Bag`; otherwise all bags are returned.
pub fn resolve_validation_errors(request: &InertiaRequest) -> Map<String, JsonValue> {
    let Some(errors) = request
        .session()
        .and_then(Session::errors)
        .and_then(JsonValue::as_object)
    else {
        return Map::new();
    };

    let mut bags: Map<String, JsonValue> = errors
        .iter()
        .map(|(bag, value)| {
            let value = if value.is_object() {
                value.clone()
            } else {
                let mut wrapped = Map::new();
                wrapped.insert("default".to_string(), value.clone());
                JsonValue::Object(wrapped)
            };
            (bag.clone(), value)
        })
        .collect();

    match (bags.remove("default"), request.error_bag()) {
        (Some(default), Some(bag)) => {
            let mut named = Map::new();
            named.insert(bag.to_string(), default);
            named
        }
        (Some(JsonValue::Object(default)), None) => default,
        (Some(default), None) => {
            bags.insert("default".to_string(), default);
            bags
        }
        (None, _) => bags,
    }
}
