// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP server components.
//!
//! # Components
//!
//! - `adapter`: axum layer around the protocol middleware
//! - `http`: router for configured pages and public assets

/// axum adapter for the protocol middleware.
pub mod adapter;
/// HTTP server implementation using Axum.
pub mod http;

pub use adapter::{inertia_layer, InertiaRejection, InertiaResponse, InertiaResult};
pub use http::{build_router, create_server, ConfigHooks};
