// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Request-scoped shared state.
//!
//! The middleware seeds a fresh [`Factory`] for every request. Handlers add
//! shared props to it and build page responses through it; nothing here
//! outlives the request.
//!
//! A [`Factory`] is a handle: clones share the same state, so changes a
//! handler makes through its [`Context`](crate::Context) are seen by the
//! middleware when it post-processes the response.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value as JsonValue};

use crate::error::Result;
use crate::page::PageResponse;
use crate::path::{get_value_path, set_prop_path, SEPARATOR};
use crate::prop::{Prop, Props};
use crate::request::InertiaRequest;
use crate::resolve::resolve_props;
use crate::response::HttpResponse;

/// Default root template name.
pub const DEFAULT_ROOT_VIEW: &str = "app";

type VersionFn = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// The current asset version, fixed or computed on demand.
#[derive(Clone)]
pub enum AssetVersion {
    /// A known version string.
    Static(String),
    /// A producer invoked each time the version is read.
    Lazy(VersionFn),
}

impl AssetVersion {
    /// A version computed on demand.
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(producer))
    }

    /// Returns the version, or `None` if it cannot be determined.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Static(version) => Some(version.clone()),
            Self::Lazy(producer) => producer(),
        }
    }
}

impl fmt::Debug for AssetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(version) => f.debug_tuple("Static").field(version).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for AssetVersion {
    fn from(version: &str) -> Self {
        Self::Static(version.to_string())
    }
}

impl From<String> for AssetVersion {
    fn from(version: String) -> Self {
        Self::Static(version)
    }
}

/// Shared props, root view and asset version for one request.
#[derive(Clone, Default)]
pub struct Factory {
    state: Arc<Mutex<FactoryState>>,
}

#[derive(Debug)]
struct FactoryState {
    shared: Props,
    root_view: String,
    version: Option<AssetVersion>,
}

impl Default for FactoryState {
    fn default() -> Self {
        Self {
            shared: Props::new(),
            root_view: DEFAULT_ROOT_VIEW.to_string(),
            version: None,
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Factory").field(&*self.state()).finish()
    }
}

impl Factory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FactoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Shares a prop with every page rendered for this request.
    ///
    /// A dotted key such as `auth.user` is stored at the nested path.
    pub fn share(&self, key: &str, value: impl Into<Prop>) {
        let mut state = self.state();
        if key.contains(SEPARATOR) {
            set_prop_path(&mut state.shared, key, value.into());
        } else {
            state.shared.insert(key.to_string(), value.into());
        }
    }

    /// Shares several props at the top level. Keys are taken literally.
    pub fn share_many(&self, props: Props) {
        self.state().shared.extend(props);
    }

    /// A copy of the unresolved shared props.
    pub fn shared_props(&self) -> Props {
        self.state().shared.clone()
    }

    /// Resolves all shared props.
    ///
    /// Lazy props are invoked on every call.
    pub async fn shared(&self) -> Result<Map<String, JsonValue>> {
        resolve_props(self.shared_props(), false).await
    }

    /// Resolves shared props and returns the value at a dotted path.
    pub async fn shared_value(&self, key: &str) -> Result<Option<JsonValue>> {
        let shared = self.shared().await?;
        Ok(get_value_path(&shared, key).cloned())
    }

    /// Sets the root template used for full page loads.
    pub fn set_root_view(&self, name: impl Into<String>) {
        self.state().root_view = name.into();
    }

    /// The root template name.
    pub fn root_view(&self) -> String {
        self.state().root_view.clone()
    }

    /// Sets the asset version.
    ///
    /// The middleware compares the client's version against this value
    /// after the handler returns, so a handler may change it.
    pub fn version(&self, version: impl Into<AssetVersion>) {
        self.state().version = Some(version.into());
    }

    /// The asset version, or `""` when none can be determined.
    pub fn get_version(&self) -> String {
        let version = self.state().version.clone();
        version.as_ref().and_then(AssetVersion::resolve).unwrap_or_default()
    }

    /// Starts a page response carrying the shared props.
    ///
    /// Props given here override shared props with the same key.
    pub fn render(&self, component: impl Into<String>, props: Props) -> PageResponse {
        let mut merged = self.shared_props();
        merged.extend(props);
        PageResponse::new(component, merged, self.root_view(), self.get_version())
    }

    /// A `303 See Other` redirect.
    pub fn redirect(&self, url: impl Into<String>) -> HttpResponse {
        HttpResponse::redirect_with_status(303, url)
    }

    /// Sends the client to `url` with a full browser navigation.
    ///
    /// Inertia visits get a 409 location visit and the URL is recorded as
    /// the session's previous URL; plain requests get a 303 redirect. The
    /// updated session travels on the response for the host to persist.
    pub fn location(&self, url: impl Into<String>, request: &mut InertiaRequest) -> HttpResponse {
        let url = url.into();
        if request.is_inertia() {
            let session = request.session_mut();
            session.set_previous_url(url.clone());
            return HttpResponse::location_visit(url).with_session(session.clone());
        }
        self.redirect(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn props(value: JsonValue) -> Props {
        crate::prop::props_from_json(value.as_object().cloned().unwrap())
    }

    #[tokio::test]
    async fn test_share_dotted_key_nests() {
        let factory = Factory::new();
        factory.share("auth.user.name", "ada");
        factory.share("flash", json!({ "ok": true }));

        assert_eq!(
            JsonValue::Object(factory.shared().await.unwrap()),
            json!({ "auth": { "user": { "name": "ada" } }, "flash": { "ok": true } })
        );
        assert_eq!(
            factory.shared_value("auth.user.name").await.unwrap(),
            Some(json!("ada"))
        );
        assert_eq!(factory.shared_value("auth.missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_share_many_keeps_literal_keys() {
        let factory = Factory::new();
        factory.share_many(props(json!({ "a.b": 1 })));
        assert_eq!(
            JsonValue::Object(factory.shared().await.unwrap()),
            json!({ "a.b": 1 })
        );
    }

    #[tokio::test]
    async fn test_shared_is_recomputed_per_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let factory = Factory::new();
        factory.share(
            "tick",
            Prop::lazy(move || counter.fetch_add(1, Ordering::SeqCst) as u64),
        );

        assert_eq!(factory.shared_value("tick").await.unwrap(), Some(json!(0)));
        assert_eq!(factory.shared_value("tick").await.unwrap(), Some(json!(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_version_sources() {
        let factory = Factory::new();
        assert_eq!(factory.get_version(), "");

        factory.version("abc");
        assert_eq!(factory.get_version(), "abc");

        factory.version(AssetVersion::lazy(|| Some("lazy".to_string())));
        assert_eq!(factory.get_version(), "lazy");

        factory.version(AssetVersion::lazy(|| None));
        assert_eq!(factory.get_version(), "");
    }

    #[test]
    fn test_render_merges_shared_then_props() {
        let factory = Factory::new();
        factory.share("title", "shared");
        factory.share("user", "ada");
        factory.set_root_view("admin");
        factory.version("v2");

        let page = factory.render("Dashboard", props(json!({ "title": "own" })));
        assert_eq!(page.component(), "Dashboard");
        assert_eq!(page.view(), "admin");
        assert_eq!(page.version(), "v2");

        let keys: Vec<&str> = page.props().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "user"]);
        assert!(matches!(page.props().get("title"), Some(Prop::Plain(v)) if v == "own"));
    }

    #[test]
    fn test_redirect_is_see_other() {
        let response = Factory::new().redirect("/users");
        assert_eq!(response.status, 303);
        assert_eq!(response.header("Location"), Some("/users"));
    }

    #[test]
    fn test_location_for_inertia_request() {
        let mut request = InertiaRequest::new("GET", "http://localhost/").with_header("X-Inertia", "true");
        let response = Factory::new().location("https://example.com/sso", &mut request);

        assert_eq!(response.status, 409);
        assert_eq!(response.header("X-Inertia-Location"), Some("https://example.com/sso"));
        assert_eq!(
            request.session().and_then(|s| s.previous_url()),
            Some("https://example.com/sso")
        );
        assert_eq!(
            response.session.as_ref().and_then(Session::previous_url),
            Some("https://example.com/sso")
        );
    }

    #[test]
    fn test_clones_share_state() {
        let factory = Factory::new();
        let handle = factory.clone();
        handle.version("v2");
        handle.share("flash", "saved");
        handle.set_root_view("admin");

        assert_eq!(factory.get_version(), "v2");
        assert_eq!(factory.root_view(), "admin");
        assert!(factory.shared_props().contains_key("flash"));
    }

    #[test]
    fn test_location_for_plain_request() {
        let mut request = InertiaRequest::new("GET", "http://localhost/");
        let response = Factory::new().location("/login", &mut request);

        assert_eq!(response.status, 303);
        assert_eq!(response.header("Location"), Some("/login"));
        assert!(request.session().is_none());
        assert!(response.session.is_none());
    }
}
