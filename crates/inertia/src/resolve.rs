// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Prop resolution.
//!
//! Turns a [`Props`] map into plain JSON. For every entry, in this order:
//!
//! 1. a lazy prop is invoked
//! 2. an awaitable prop is awaited
//! 3. a convertible prop is converted with [`ToStructuredValue`](crate::ToStructuredValue)
//! 4. maps and lists are resolved recursively
//!
//! Steps 1-3 repeat until the entry is plain, a map or a list. Dotted
//! top-level keys (`"auth.user"`) are unpacked into nested objects when
//! requested; keys below the top level are left alone.

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value as JsonValue};

use crate::error::{InertiaError, Result};
use crate::path::{set_value_path, SEPARATOR};
use crate::prop::{Prop, Props};

/// Resolves every prop to plain JSON, preserving key order.
///
/// Fails with [`InertiaError::PropResolution`] on the first producer that
/// fails; nothing is returned for the remaining props.
pub async fn resolve_props(props: Props, unpack_dot_props: bool) -> Result<Map<String, JsonValue>> {
    resolve_map(props, unpack_dot_props, String::new()).await
}

/// Resolves a single prop to plain JSON.
pub async fn resolve_prop(prop: Prop) -> Result<JsonValue> {
    resolve_value(prop, String::new()).await
}

fn resolve_map(
    props: Props,
    unpack_dot_props: bool,
    prefix: String,
) -> BoxFuture<'static, Result<Map<String, JsonValue>>> {
    async move {
        let mut resolved = Map::new();

        for (key, prop) in props {
            let value = resolve_value(prop, join_path(&prefix, &key)).await?;

            if unpack_dot_props && key.contains(SEPARATOR) {
                set_value_path(&mut resolved, &key, value);
            } else {
                resolved.insert(key, value);
            }
        }

        Ok(resolved)
    }
    .boxed()
}

fn resolve_value(prop: Prop, path: String) -> BoxFuture<'static, Result<JsonValue>> {
    async move {
        let mut prop = prop;

        loop {
            prop = match prop {
                Prop::Lazy(producer) => producer().map_err(|e| InertiaError::prop(&path, e))?,
                other => other,
            };

            prop = match prop {
                Prop::Awaitable(producer) => producer()
                    .await
                    .map_err(|e| InertiaError::prop(&path, e))?,
                other => other,
            };

            prop = match prop {
                Prop::Convertible(object) => Prop::Map(object.to_structured_value()),
                other => other,
            };

            match prop {
                Prop::Plain(value) => return Ok(value),
                Prop::Map(map) => {
                    let resolved = resolve_map(map, false, path).await?;
                    return Ok(JsonValue::Object(resolved));
                }
                Prop::List(items) => {
                    let mut resolved = Vec::with_capacity(items.len());
                    for (index, item) in items.into_iter().enumerate() {
                        let item_path = join_path(&path, &index.to_string());
                        resolved.push(resolve_value(item, item_path).await?);
                    }
                    return Ok(JsonValue::Array(resolved));
                }
                deferred => prop = deferred,
            }
        }
    }
    .boxed()
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{key}")
    }
}
