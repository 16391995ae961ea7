// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! Inertia CLI library.
//!
//! This crate provides the `inertia` command and an axum adapter for the
//! protocol engine.
//!
//! # Usage
//!
//! ```bash
//! inertia serve          # Serve pages from inertia.toml
//! inertia ssr bundle     # Show the detected SSR bundle
//! inertia ssr check      # Check the SSR render service
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `inertia.toml` at the project root.

/// CLI commands (serve, ssr).
pub mod commands;
/// Project configuration from `inertia.toml`.
pub mod config;
/// axum adapter and HTTP server.
pub mod server;
