// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # Inertia
//!
//! Server-side engine for the Inertia page protocol.
//!
//! Handlers return a component name plus props. The engine turns that into
//! a JSON page object for client-side visits, or a full HTML document for
//! the first visit, optionally pre-rendered by an external SSR service.
//!
//! ## Features
//!
//! - Lazy, async and convertible props, resolved only when sent
//! - Partial reloads that skip unrequested props entirely
//! - Request-scoped shared props, root view and asset version
//! - Asset version negotiation with forced location visits
//! - Redirect and empty-response handling for form submissions
//! - SSR over HTTP with silent fallback to local rendering
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use inertia::{Inertia, InertiaConfig, InertiaRequest, Middleware, Prop, Props};
//!
//! let middleware = Middleware::new(Inertia::new(InertiaConfig::load("inertia.toml")?));
//!
//! let request = InertiaRequest::new("GET", "http://localhost/users")
//!     .with_header("X-Inertia", "true");
//! let response = middleware
//!     .process(request, |ctx| async move {
//!         let page = ctx
//!             .render("Users/Index", Props::new())
//!             .with("users", Prop::awaitable(|| load_users()));
//!         ctx.respond(page).await
//!     })
//!     .await?;
//! ```

/// Shared application services.
pub mod app;
/// Engine configuration.
pub mod config;
/// Error types.
pub mod error;
/// Request-scoped shared state.
pub mod factory;
/// Protocol header names.
pub mod headers;
/// Protocol middleware and hooks.
pub mod middleware;
/// Page objects and the page response builder.
pub mod page;
/// Partial-reload prop selection.
pub mod partial;
/// Dotted-path helpers.
pub mod path;
/// Prop values.
pub mod prop;
/// HTTP request abstraction for the engine.
pub mod request;
/// Prop resolution.
pub mod resolve;
/// HTTP response abstraction for the engine.
pub mod response;
/// Request session data.
pub mod session;
/// Server-side rendering.
pub mod ssr;
/// Asset version detection.
pub mod version;
/// Root template rendering.
pub mod view;

pub use app::Inertia;
pub use config::{InertiaConfig, SsrConfig};
pub use error::{BoxError, InertiaError, Result};
pub use factory::{AssetVersion, Factory};
pub use middleware::{error_props, redirect_back, resolve_validation_errors, Context, DefaultHooks, Middleware, MiddlewareHooks};
pub use page::{Page, PageResponse};
pub use partial::filter_partial;
pub use prop::{Prop, Props, ToStructuredValue};
pub use request::InertiaRequest;
pub use resolve::{resolve_prop, resolve_props};
pub use response::{HttpResponse, ResponseBody};
pub use session::Session;
pub use ssr::{detect_bundle, DisabledGateway, Gateway, HttpGateway, SsrResponse};
pub use version::detect_version;
pub use view::{ShellRenderer, ViewRenderer};
