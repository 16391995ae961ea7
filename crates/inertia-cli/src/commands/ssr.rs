// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! SSR inspection commands.
//!
//! - `bundle`: show which bundle the render service should load
//! - `check`: send a sample page to the render service

use console::style;
use inertia::{detect_bundle, Gateway, HttpGateway, Page};
use serde_json::Map;

use crate::config::Config;

/// Prints the detected SSR bundle.
pub async fn bundle() -> anyhow::Result<()> {
    let config = Config::load()?;
    let base_dir = std::env::current_dir()?;

    match detect_bundle(&config.inertia, &base_dir) {
        Some(path) => {
            println!("{} {}", style("✓").green(), path.display());
        }
        None => {
            println!("{}", style("No SSR bundle found.").yellow());
            println!(
                "{}",
                style("Looked for ssr.bundle, bootstrap/ssr/ssr.mjs, bootstrap/ssr/ssr.js and <public>/js/ssr.js").dim()
            );
        }
    }
    Ok(())
}

/// Renders a sample page through the configured render service.
///
/// The check runs even if `ssr.enabled` is false.
pub async fn check(component: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut ssr = config.inertia.ssr.clone();
    ssr.enabled = true;
    let url = ssr.url.clone();
    let gateway = HttpGateway::new(ssr);

    let page = Page {
        component: component.to_string(),
        props: Map::new(),
        url: "/".to_string(),
        version: String::new(),
    };

    println!("{} {}", style("Probing").cyan(), url);
    match gateway.dispatch(&page).await {
        Some(response) => {
            println!("{} Render service answered", style("✓").green());
            println!("{} {} byte(s)", style("head:").dim(), response.head.len());
            println!("{} {} byte(s)", style("body:").dim(), response.body.len());
            Ok(())
        }
        None => {
            eprintln!("{} Render service unavailable", style("✗").red());
            anyhow::bail!("SSR check failed for {}", url)
        }
    }
}
