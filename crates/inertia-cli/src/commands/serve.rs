// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Server command.
//!
//! Serves the pages declared in `inertia.toml` through the protocol layer.

use console::style;

use crate::config::Config;
use crate::server::create_server;

/// Runs the server. Command-line values override `[server]` settings.
pub async fn run(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    println!("{}", style("Starting Inertia server...").cyan().bold());
    println!(
        "{} {} page(s), root view {}",
        style("Loaded").green(),
        config.pages.len(),
        style(&config.inertia.root_view).cyan()
    );
    if config.inertia.ssr.enabled {
        println!(
            "{} {}",
            style("SSR enabled:").dim(),
            config.inertia.ssr.url
        );
    }

    let addr = format!("{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        style("Server running at").green().bold(),
        style(format!("http://{}", addr)).cyan().underlined()
    );
    println!("{}", style("Press Ctrl+C to stop").dim());

    create_server(&addr, config).await
}
