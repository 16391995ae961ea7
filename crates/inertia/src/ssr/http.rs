// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP render-service gateway.
//!
//! POSTs the page object as JSON and expects `{"head": [..], "body": ".."}`
//! back. One attempt per page, bounded by `ssr.timeout_ms`. Dropping the
//! dispatch future aborts the outbound request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;

use super::{Gateway, SsrResponse};
use crate::config::SsrConfig;
use crate::page::Page;

/// Wire format returned by the render service.
#[derive(Debug, Deserialize)]
struct RenderedPage {
    #[serde(default)]
    head: Vec<String>,
    body: String,
}

/// Gateway to an HTTP render service.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: SsrConfig,
}

impl HttpGateway {
    /// Creates a gateway from the SSR configuration.
    pub fn new(config: SsrConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to configure SSR client, using defaults: {}", e);
                Client::new()
            });

        Self { client, config }
    }

    /// The configuration this gateway was built with.
    pub fn config(&self) -> &SsrConfig {
        &self.config
    }

    async fn render(&self, page: &Page) -> Result<SsrResponse, reqwest::Error> {
        let rendered: RenderedPage = self
            .client
            .post(&self.config.url)
            .header(ACCEPT, "application/json")
            .json(page)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(SsrResponse {
            head: rendered.head.join("\n"),
            body: rendered.body,
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn dispatch(&self, page: &Page) -> Option<SsrResponse> {
        if !self.config.enabled {
            return None;
        }

        match self.render(page).await {
            Ok(response) => {
                tracing::debug!(component = %page.component, "SSR render succeeded");
                Some(response)
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.config.url,
                    component = %page.component,
                    "SSR render failed, falling back to local rendering: {}",
                    e
                );
                None
            }
        }
    }
}
