// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Server-side rendering.
//!
//! A [`Gateway`] hands the page object to an external render process and
//! gets back HTML fragments for the document head and body. A gateway never
//! fails: when rendering is disabled or the renderer misbehaves it returns
//! `None` and the page is rendered locally instead.

mod bundle;
mod http;

pub use bundle::detect_bundle;
pub use http::HttpGateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::page::Page;

/// HTML fragments produced by the render service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsrResponse {
    /// Markup for the document head, one tag per line.
    pub head: String,
    /// Markup for the application root.
    pub body: String,
}

/// Sends pages to a server-side renderer.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Renders `page`, or returns `None` to request local rendering.
    async fn dispatch(&self, page: &Page) -> Option<SsrResponse>;
}

/// A gateway that never renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

#[async_trait]
impl Gateway for DisabledGateway {
    async fn dispatch(&self, _page: &Page) -> Option<SsrResponse> {
        None
    }
}
