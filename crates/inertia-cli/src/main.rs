// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use inertia_cli::commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inertia")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Server-side engine for the Inertia page protocol", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the pages declared in inertia.toml
    Serve {
        /// Port to run the server on (default: [server] port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind to (default: [server] host)
        #[arg(long)]
        host: Option<String>,
    },
    /// Inspect server-side rendering
    Ssr {
        #[command(subcommand)]
        command: SsrCommands,
    },
}

#[derive(Subcommand)]
enum SsrCommands {
    /// Show the SSR bundle the render service should load
    Bundle,
    /// Send a sample page to the render service
    Check {
        /// Component name for the sample page
        #[arg(long, default_value = "SsrCheck")]
        component: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    match cli.command {
        Commands::Serve { port, host } => {
            commands::serve::run(host, port).await
        }
        Commands::Ssr { command } => match command {
            SsrCommands::Bundle => commands::ssr::bundle().await,
            SsrCommands::Check { component } => commands::ssr::check(&component).await,
        },
    }
}
