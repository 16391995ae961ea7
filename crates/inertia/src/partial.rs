// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Partial reloads.
//!
//! A partial reload names a component (`X-Inertia-Partial-Component`) and
//! the props it wants (`X-Inertia-Partial-Data`). When the component
//! matches, only those top-level props are kept. Filtering happens before
//! resolution, so lazy props that were not asked for never run.

use crate::prop::Props;
use crate::request::InertiaRequest;

/// Selects the props requested by a partial reload.
///
/// Returns `props` unchanged when no keys are requested or when the
/// requested component is not `component`. Requested keys that do not
/// exist are skipped.
pub fn filter_partial(props: Props, component: &str, request: &InertiaRequest) -> Props {
    let only = request.partial_data();
    if only.is_empty() || request.partial_component().unwrap_or("") != component {
        return props;
    }

    tracing::debug!(component, keys = ?only, "Partial reload");

    props
        .into_iter()
        .filter(|(key, _)| only.iter().any(|wanted| wanted == key))
        .collect()
}
