//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing, CORS)
//! - Resolve routes, read bounded bodies, enforce the request deadline
//! - Bind server to listener with graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{BubbleConfig, CorsConfig};
use crate::http::envelope::ApiError;
use crate::http::handlers;
use crate::http::request::{request_id, UuidRequestId};
use crate::observability::metrics;
use crate::routing::{Resolution, RouteTable};
use crate::usecase::Services;

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub routes: Arc<RouteTable>,
    pub max_body_size: usize,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(config: &BubbleConfig, services: Services) -> Self {
        Self {
            services,
            routes: Arc::new(RouteTable::standard()),
            max_body_size: config.server.max_body_size,
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        }
    }
}

/// HTTP server for the bubble API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given use-cases.
    pub fn new(config: &BubbleConfig, services: Services) -> Self {
        let state = AppState::new(config, services);
        Self {
            router: build_router(config, state),
        }
    }

    /// Serve until `shutdown` resolves, then drain open connections.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &BubbleConfig, state: AppState) -> Router {
    Router::new()
        .route("/", any(dispatch))
        .route("/{*path}", any(dispatch))
        .with_state(state)
        .layer(cors_layer(&config.cors))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id(request),
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
}

/// Single entry point for every request.
/// Resolves the route, then reads the body and runs the handler under one deadline.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let route = match state.routes.resolve(&method, &path) {
        Resolution::Matched(route) => route,
        Resolution::InvalidParam(endpoint) => {
            tracing::debug!(method = %method, path = %path, "Undecodable path parameter");
            metrics::record_request(&method, 400, endpoint.name(), start_time);
            return ApiError::bad_request("invalid path parameter", "path parameter is not valid UTF-8")
                .into_response();
        }
        Resolution::MethodNotAllowed => {
            tracing::debug!(method = %method, path = %path, "Method not allowed");
            metrics::record_request(&method, 405, "none", start_time);
            return ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed", "method not allowed")
                .into_response();
        }
        Resolution::NotFound => {
            tracing::debug!(method = %method, path = %path, "No route matched");
            metrics::record_request(&method, 404, "none", start_time);
            return ApiError::new(StatusCode::NOT_FOUND, "route not found", "not found").into_response();
        }
    };
    let endpoint = route.endpoint.name();
    let body = request.into_body();

    let work = async {
        let body = if route.endpoint.takes_body() {
            match read_body(body, state.max_body_size).await {
                Ok(bytes) => bytes,
                Err(e) => return e.into_response(),
            }
        } else {
            Bytes::new()
        };
        handlers::handle(&state.services, &route, &body).await
    };

    // Dropping `work` on timeout also drops a stalled body read or an in-flight query.
    let response = match tokio::time::timeout(state.request_timeout, work).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(endpoint, timeout = ?state.request_timeout, "Request timed out");
            ApiError::new(StatusCode::GATEWAY_TIMEOUT, "request timed out", "timeout").into_response()
        }
    };

    let status = response.status();
    metrics::record_request(&method, status.as_u16(), endpoint, start_time);
    tracing::debug!(
        endpoint,
        status = status.as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}

/// Buffer a request body of at most `limit` bytes.
async fn read_body(body: Body, limit: usize) -> Result<Bytes, ApiError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "request body too large",
            format!("body must not exceed {} bytes", limit),
        )),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read request body");
            Err(ApiError::bad_request("invalid request body", "body could not be read"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn chunked(chunks: Vec<Result<&'static str, std::io::Error>>) -> Body {
        let stream = futures_util::stream::iter(chunks.into_iter().map(|c| c.map(|s| Bytes::from_static(s.as_bytes()))));
        Body::from_stream(stream)
    }

    #[tokio::test]
    async fn test_read_body_within_limit() {
        let bytes = read_body(Body::from("{\"a\":1}"), 64).await.unwrap();
        assert_eq!(&bytes[..], b"{\"a\":1}");
    }

    #[tokio::test]
    async fn test_read_body_over_limit_is_413() {
        let err = read_body(Body::from("x".repeat(65)), 64).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let streamed = chunked(vec![Ok("0123456789"), Ok("0123456789")]);
        let err = read_body(streamed, 15).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_broken_body_stream_is_400() {
        let broken = chunked(vec![
            Ok("{\"title\":"),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "peer went away")),
        ]);
        let err = read_body(broken, 1024).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "invalid request body");
    }

    #[tokio::test]
    async fn test_empty_body_allowed() {
        let body = Body::from_stream(futures_util::stream::empty::<Result<Bytes, Infallible>>());
        assert!(read_body(body, 16).await.unwrap().is_empty());
    }
}
