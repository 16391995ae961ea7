// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Header names used by the Inertia protocol.

/// Marks a request as an Inertia visit, and a response as an Inertia page.
pub const X_INERTIA: &str = "X-Inertia";
/// Asset version the client was built against.
pub const X_INERTIA_VERSION: &str = "X-Inertia-Version";
/// Comma-separated prop keys requested by a partial reload.
pub const X_INERTIA_PARTIAL_DATA: &str = "X-Inertia-Partial-Data";
/// Component a partial reload applies to.
pub const X_INERTIA_PARTIAL_COMPONENT: &str = "X-Inertia-Partial-Component";
/// Error bag to namespace validation errors under.
pub const X_INERTIA_ERROR_BAG: &str = "X-Inertia-Error-Bag";
/// URL the client must hard-navigate to.
pub const X_INERTIA_LOCATION: &str = "X-Inertia-Location";

/// Standard `Vary` header.
pub const VARY: &str = "Vary";
/// Standard `Content-Type` header.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Standard `Location` header.
pub const LOCATION: &str = "Location";
/// Standard `Referer` header.
pub const REFERER: &str = "Referer";
