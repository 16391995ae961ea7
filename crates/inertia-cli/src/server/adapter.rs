// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! axum adapter for the protocol middleware.
//!
//! [`inertia_layer`] converts the axum request into an [`InertiaRequest`],
//! runs the rest of the stack inside [`Middleware::process`] and converts the
//! result back. Downstream handlers pick up their [`Context`] with
//! `Extension<Context>` and return [`InertiaResponse`].
//!
//! A host application can attach a [`Session`] as a request extension in an
//! outer layer; it is handed to the engine for validation errors and
//! redirect-back targets. When the engine changes the session (location
//! visits record the previous URL), the updated [`Session`] is attached to
//! the outgoing response as an extension for that layer to persist.

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use inertia::{
    Context, HttpResponse, InertiaError, InertiaRequest, Middleware, MiddlewareHooks, ResponseBody,
    Session,
};

const MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// axum middleware function running the Inertia protocol.
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(home))
///     .layer(axum::middleware::from_fn_with_state(middleware, inertia_layer::<DefaultHooks>));
/// ```
pub async fn inertia_layer<H: MiddlewareHooks>(
    State(middleware): State<Middleware<H>>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let inertia_request = to_inertia_request(&parts);

    let result = middleware
        .process(inertia_request, |ctx| async move {
            let mut request = Request::from_parts(parts, body);
            request.extensions_mut().insert(ctx);
            Ok(from_axum_response(next.run(request).await).await)
        })
        .await;

    match result {
        Ok(response) => InertiaResponse(response).into_response(),
        Err(e) => InertiaRejection(e).into_response(),
    }
}

/// Builds the engine request from axum request parts.
///
/// The URL is absolute: scheme from `X-Forwarded-Proto` (default `http`),
/// authority from the `Host` header (default `localhost`).
pub fn to_inertia_request(parts: &Parts) -> InertiaRequest {
    let headers: HashMap<String, String> = parts
        .headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
        .collect();

    let url = if parts.uri.authority().is_some() {
        parts.uri.to_string()
    } else {
        let scheme = headers
            .get("x-forwarded-proto")
            .map(String::as_str)
            .unwrap_or("http");
        let host = headers.get("host").map(String::as_str).unwrap_or("localhost");
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        format!("{}://{}{}", scheme, host, path)
    };

    let mut request = InertiaRequest::new(parts.method.as_str(), url).with_headers(headers);
    if let Some(session) = parts.extensions.get::<Session>() {
        request = request.with_session(session.clone());
    }
    request
}

/// Buffers an axum response into an engine response.
///
/// Repeated headers are kept. UTF-8 bodies become text; anything else is
/// kept as raw bytes.
pub async fn from_axum_response(response: Response) -> HttpResponse {
    let (parts, body) = response.into_parts();

    let bytes = match axum::body::to_bytes(body, MAX_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to buffer response body: {}", e);
            return HttpResponse::html(500, "Failed to read response body");
        }
    };

    let headers = parts
        .headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
        .collect();

    let body = if bytes.is_empty() {
        ResponseBody::Empty
    } else {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => ResponseBody::Text(text),
            Err(e) => ResponseBody::Bytes(e.into_bytes()),
        }
    };

    HttpResponse {
        status: parts.status.as_u16(),
        headers,
        body,
        session: parts.extensions.get::<Session>().cloned(),
    }
}

/// An engine response returned from an axum handler.
#[derive(Debug, Clone)]
pub struct InertiaResponse(pub HttpResponse);

impl From<HttpResponse> for InertiaResponse {
    fn from(response: HttpResponse) -> Self {
        Self(response)
    }
}

impl IntoResponse for InertiaResponse {
    fn into_response(self) -> Response {
        let response = self.0;
        let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);

        let mut builder = Response::builder().status(status);
        for (key, value) in response.headers {
            builder = builder.header(key, value);
        }

        if let Some(session) = response.session {
            builder = builder.extension(session);
        }

        let body = match response.body {
            ResponseBody::Empty => Body::empty(),
            ResponseBody::Text(text) => Body::from(text),
            ResponseBody::Json(value) => Body::from(value.to_string()),
            ResponseBody::Bytes(bytes) => Body::from(bytes),
        };

        builder.body(body).unwrap_or_else(|_| {
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response()
        })
    }
}

/// An engine error returned from an axum handler: logged, then answered
/// with a 500.
#[derive(Debug)]
pub struct InertiaRejection(pub InertiaError);

impl From<InertiaError> for InertiaRejection {
    fn from(error: InertiaError) -> Self {
        Self(error)
    }
}

impl IntoResponse for InertiaRejection {
    fn into_response(self) -> Response {
        tracing::error!("Inertia response failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Result type for axum handlers behind [`inertia_layer`].
pub type InertiaResult = Result<InertiaResponse, InertiaRejection>;

/// Renders a page through the handler's context.
pub async fn respond(ctx: &Context, page: inertia::PageResponse) -> InertiaResult {
    Ok(ctx.respond(page).await?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::SET_COOKIE, Request as HttpRequest};

    fn parts(request: HttpRequest<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_url_from_host_header() {
        let request = to_inertia_request(&parts(
            HttpRequest::get("/users?page=2")
                .header("Host", "example.com")
                .header("X-Inertia", "true")
                .body(())
                .unwrap(),
        ));
        assert_eq!(request.url, "http://example.com/users?page=2");
        assert_eq!(request.method, "GET");
        assert!(request.is_inertia());
    }

    #[test]
    fn test_url_honours_forwarded_proto() {
        let request = to_inertia_request(&parts(
            HttpRequest::post("/save")
                .header("host", "example.com")
                .header("x-forwarded-proto", "https")
                .body(())
                .unwrap(),
        ));
        assert_eq!(request.url, "https://example.com/save");
        assert!(request.is_method("POST"));
    }

    #[test]
    fn test_session_extension_is_forwarded() {
        let mut request = HttpRequest::get("/").body(()).unwrap();
        request
            .extensions_mut()
            .insert(Session::new().with_errors(serde_json::json!({ "default": { "a": "b" } })));
        let request = to_inertia_request(&parts(request));
        assert!(request.session().is_some_and(|s| s.errors().is_some()));
    }

    #[tokio::test]
    async fn test_response_round_trip_keeps_status_and_headers() {
        let original = HttpResponse::location_visit("http://example.com/");
        let response = InertiaResponse(original).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let back = from_axum_response(response).await;
        assert_eq!(back.status, 409);
        assert_eq!(back.header("x-inertia-location"), Some("http://example.com/"));
        assert!(back.body.is_empty());
    }

    #[tokio::test]
    async fn test_response_round_trip_keeps_repeated_headers() {
        let response = Response::builder()
            .header(SET_COOKIE, "a=1")
            .header(SET_COOKIE, "b=2")
            .body(Body::from("ok"))
            .unwrap();

        let back = from_axum_response(response).await;
        assert_eq!(back.header_all("set-cookie"), vec!["a=1", "b=2"]);

        let response = InertiaResponse(back).into_response();
        let cookies: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
    }

    #[tokio::test]
    async fn test_response_round_trip_keeps_binary_body() {
        let bytes = vec![0xff, 0xfe, 0x00, 0x01];
        let back = from_axum_response(bytes.clone().into_response()).await;
        assert_eq!(back.body, ResponseBody::Bytes(bytes.clone()));

        let response = InertiaResponse(back).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.to_vec(), bytes);
    }

    #[tokio::test]
    async fn test_session_travels_as_response_extension() {
        let mut session = Session::new();
        session.set_previous_url("https://example.com/sso");
        let original = HttpResponse::location_visit("https://example.com/sso").with_session(session.clone());

        let response = InertiaResponse(original).into_response();
        assert_eq!(response.extensions().get::<Session>(), Some(&session));

        let back = from_axum_response(response).await;
        assert_eq!(back.session, Some(session));
    }

    #[test]
    fn test_rejection_is_internal_error() {
        let response = InertiaRejection(InertiaError::View("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
