// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `serve`: Serve configured pages through the protocol layer
//! - `ssr`: Inspect the server-side rendering setup

/// Server command.
pub mod serve;
/// SSR inspection commands.
pub mod ssr;
