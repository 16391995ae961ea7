// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Prop values.
//!
//! A page's props are an ordered map of [`Prop`]s. Besides plain JSON, a
//! prop can be computed on demand:
//!
//! - [`Prop::lazy`] / [`Prop::try_lazy`]: a closure, invoked only if the prop
//!   survives partial-reload filtering
//! - [`Prop::awaitable`] / [`Prop::try_awaitable`]: a closure producing a
//!   future, awaited during resolution
//! - [`Prop::convertible`]: a domain object implementing [`ToStructuredValue`]
//!
//! Producers may return further producers; resolution keeps going until a
//! plain value is reached.
//!
//! # Example
//!
//! ```rust
//! use inertia::{Prop, Props};
//!
//! let mut props = Props::new();
//! props.insert("title".into(), Prop::from("Users"));
//! props.insert("users".into(), Prop::lazy(|| serde_json::json!(["ada", "grace"])));
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::BoxError;

/// Ordered map of prop name to [`Prop`].
pub type Props = IndexMap<String, Prop>;

type LazyFn = Arc<dyn Fn() -> Result<Prop, BoxError> + Send + Sync>;
type AwaitableFn = Arc<dyn Fn() -> BoxFuture<'static, Result<Prop, BoxError>> + Send + Sync>;

/// A domain object that knows how to present itself as props.
pub trait ToStructuredValue: Send + Sync {
    /// Converts the object into a props map.
    fn to_structured_value(&self) -> Props;
}

/// A single prop value.
#[derive(Clone)]
pub enum Prop {
    /// A plain JSON value.
    Plain(JsonValue),
    /// A nested map whose entries may themselves be lazy.
    Map(Props),
    /// A list whose items may themselves be lazy.
    List(Vec<Prop>),
    /// A deferred computation.
    Lazy(LazyFn),
    /// A deferred asynchronous computation.
    Awaitable(AwaitableFn),
    /// An object converted with [`ToStructuredValue`].
    Convertible(Arc<dyn ToStructuredValue>),
}

impl Prop {
    /// Wraps a plain JSON value.
    pub fn plain(value: impl Into<JsonValue>) -> Self {
        Self::Plain(value.into())
    }

    /// A prop computed on demand.
    pub fn lazy<F, T>(producer: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<Prop>,
    {
        Self::Lazy(Arc::new(move || Ok(producer().into())))
    }

    /// A prop computed on demand that may fail.
    ///
    /// A failure aborts the whole page response.
    pub fn try_lazy<F, T, E>(producer: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        T: Into<Prop>,
        E: Into<BoxError>,
    {
        Self::Lazy(Arc::new(move || producer().map(Into::into).map_err(Into::into)))
    }

    /// A prop produced by a future, awaited during resolution.
    pub fn awaitable<F, Fut, T>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<Prop>,
    {
        Self::Awaitable(Arc::new(move || {
            let future = producer();
            async move { Ok(future.await.into()) }.boxed()
        }))
    }

    /// A prop produced by a future that may reject.
    ///
    /// A rejection aborts the whole page response.
    pub fn try_awaitable<F, Fut, T, E>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Into<Prop>,
        E: Into<BoxError>,
    {
        Self::Awaitable(Arc::new(move || {
            let future = producer();
            async move { future.await.map(Into::into).map_err(Into::into) }.boxed()
        }))
    }

    /// Wraps a domain object.
    pub fn convertible<T>(value: T) -> Self
    where
        T: ToStructuredValue + 'static,
    {
        Self::Convertible(Arc::new(value))
    }

    /// Serializes any `Serialize` value into a plain prop.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Plain)
    }

    /// Returns true if resolving this prop runs user code.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Lazy(_) | Self::Awaitable(_))
    }

    /// Returns the nested map, if this is a map prop.
    pub fn as_map(&self) -> Option<&Props> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
            Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
            Self::Awaitable(_) => f.write_str("Awaitable(..)"),
            Self::Convertible(_) => f.write_str("Convertible(..)"),
        }
    }
}

impl Default for Prop {
    fn default() -> Self {
        Self::Plain(JsonValue::Null)
    }
}

impl From<JsonValue> for Prop {
    fn from(value: JsonValue) -> Self {
        Self::Plain(value)
    }
}

impl From<Props> for Prop {
    fn from(map: Props) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<Prop>> for Prop {
    fn from(items: Vec<Prop>) -> Self {
        Self::List(items)
    }
}

impl From<&str> for Prop {
    fn from(value: &str) -> Self {
        Self::Plain(value.into())
    }
}

impl From<String> for Prop {
    fn from(value: String) -> Self {
        Self::Plain(value.into())
    }
}

impl From<bool> for Prop {
    fn from(value: bool) -> Self {
        Self::Plain(value.into())
    }
}

impl From<i64> for Prop {
    fn from(value: i64) -> Self {
        Self::Plain(value.into())
    }
}

impl From<i32> for Prop {
    fn from(value: i32) -> Self {
        Self::Plain(value.into())
    }
}

impl From<u64> for Prop {
    fn from(value: u64) -> Self {
        Self::Plain(value.into())
    }
}

impl From<f64> for Prop {
    fn from(value: f64) -> Self {
        Self::Plain(value.into())
    }
}

/// Converts a JSON object into props, one plain prop per entry.
pub fn props_from_json(map: serde_json::Map<String, JsonValue>) -> Props {
    map.into_iter()
        .map(|(key, value)| (key, Prop::Plain(value)))
        .collect()
}
