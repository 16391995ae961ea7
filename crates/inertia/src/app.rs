// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Application-wide services.
//!
//! [`Inertia`] bundles what every request needs but never mutates: the
//! configuration, the SSR gateway and the root template renderer. It is
//! cheap to clone and safe to share between concurrent requests; all
//! per-request state lives in [`Factory`](crate::Factory).

use std::sync::Arc;

use crate::config::InertiaConfig;
use crate::ssr::{Gateway, HttpGateway};
use crate::view::{ShellRenderer, ViewRenderer};

/// Shared services for the Inertia engine.
#[derive(Clone)]
pub struct Inertia {
    config: Arc<InertiaConfig>,
    gateway: Arc<dyn Gateway>,
    views: Arc<dyn ViewRenderer>,
}

impl Inertia {
    /// Creates services from configuration: an [`HttpGateway`] for SSR and
    /// a [`ShellRenderer`] reading templates from `views_dir`.
    pub fn new(config: InertiaConfig) -> Self {
        let gateway = HttpGateway::new(config.ssr.clone());
        let views = ShellRenderer::from_dir(&config.views_dir);
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            views: Arc::new(views),
        }
    }

    /// Replaces the SSR gateway.
    pub fn with_gateway(mut self, gateway: impl Gateway + 'static) -> Self {
        self.gateway = Arc::new(gateway);
        self
    }

    /// Replaces the root template renderer.
    pub fn with_views(mut self, views: impl ViewRenderer + 'static) -> Self {
        self.views = Arc::new(views);
        self
    }

    /// The engine configuration.
    pub fn config(&self) -> &InertiaConfig {
        &self.config
    }

    /// The SSR gateway.
    pub fn gateway(&self) -> &dyn Gateway {
        self.gateway.as_ref()
    }

    /// The root template renderer.
    pub fn views(&self) -> &dyn ViewRenderer {
        self.views.as_ref()
    }
}

impl Default for Inertia {
    fn default() -> Self {
        Self::new(InertiaConfig::default())
    }
}
