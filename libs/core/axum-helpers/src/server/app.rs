use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{handle_panic, method_not_allowed, not_found};
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use observability::{HttpMetrics, metrics_router, track_metrics};
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Wraps the application routes with the cross-cutting layers.
///
/// Layers, outermost first:
/// - request metrics (`api_requests_total`, `api_request_duration_seconds`, `api_errors_total`)
///   and the INFO line `GET /items 200 1.204ms` for every request
/// - `TraceLayer`, one INFO span per request; its response event is DEBUG
/// - `CatchPanicLayer`, panics become the uniform 500 body
///
/// It also serves the OpenAPI document at `/api-docs/openapi.json`, answers
/// unknown routes and methods with JSON, and mounts `/metrics` outside the
/// layers so scrapes are never counted.
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Example
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new()
///     .route("/example", get(handler))
///     .with_state(my_state);
///
/// let router = create_router::<ApiDoc>(api_routes, HttpMetrics::new()?);
/// ```
pub fn create_router<T>(apis: Router, metrics: HttpMetrics) -> Router
where
    T: OpenApi + 'static,
{
    let openapi = T::openapi();

    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let openapi = openapi.clone();
                async move { Json(openapi) }
            }),
        )
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(middleware::from_fn_with_state(metrics.clone(), track_metrics))
        .merge(metrics_router(metrics))
}

/// Serve `router` on an already bound listener until `coordinator` shuts down.
///
/// In-flight requests are drained first, then `cleanup` runs with at most
/// `shutdown_timeout` to finish.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Server starting on {}", listener.local_addr()?);

    let signal = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal.notified().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(_) => info!("Cleanup completed successfully"),
        Err(_) => {
            tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            );
        }
    }

    serve_result
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// Binds `server_config.address()`, serves until SIGINT or SIGTERM, then
/// runs `cleanup` (recommended timeout: 30s).
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     rotation.shutdown().await.ok();
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let listener = TcpListener::bind(server_config.address()).await?;

    let signal_handle = coordinator.clone();
    let signal_task = tokio::spawn(async move { signal_handle.wait_for_signal().await });

    let result = serve(listener, router, coordinator, shutdown_timeout, cleanup).await;
    signal_task.abort();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(paths(crate::server::health::health_handler))]
    struct TestDoc;

    async fn boom() -> &'static str {
        panic!("handler exploded")
    }

    fn app(metrics: HttpMetrics) -> Router {
        let routes = Router::new()
            .route("/boom", get(boom))
            .merge(crate::server::health::health_router());
        create_router::<TestDoc>(routes, metrics)
    }

    async fn call(router: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_panic_becomes_uniform_500_and_is_counted() {
        let metrics = HttpMetrics::new().unwrap();
        let (status, body) = call(app(metrics.clone()), "GET", "/boom").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal error occurred");
        assert_eq!(body["message"], "handler exploded");

        let rendered = metrics.render();
        assert!(rendered.lines().any(|l| l.starts_with("api_errors_total{")
            && l.contains(r#"error_kind="Panic""#)
            && l.contains(r#"path="/boom""#)));
    }

    #[tokio::test]
    async fn test_unknown_route_and_method_are_json() {
        let metrics = HttpMetrics::new().unwrap();

        let (status, body) = call(app(metrics.clone()), "GET", "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Resource Not Found");

        let (status, body) = call(app(metrics), "DELETE", "/health").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_metrics_endpoint_is_not_instrumented() {
        let metrics = HttpMetrics::new().unwrap();
        let router = app(metrics.clone());

        call(router.clone(), "GET", "/health").await;
        call(router.clone(), "GET", "/metrics").await;

        let response = router
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(text.contains(r#"path="/health""#));
        assert!(!text.contains(r#"path="/metrics""#));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (status, body) = call(app(HttpMetrics::new().unwrap()), "GET", "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/health"].is_object());
    }

    #[tokio::test]
    async fn test_serve_drains_then_runs_cleanup() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (coordinator, _rx) = ShutdownCoordinator::new();
        let cleaned_up = Arc::new(AtomicBool::new(false));

        let flag = cleaned_up.clone();
        let server = tokio::spawn(serve(
            listener,
            app(HttpMetrics::new().unwrap()),
            coordinator.clone(),
            Duration::from_secs(5),
            async move { flag.store(true, Ordering::SeqCst) },
        ));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 200"));
        assert!(raw.contains(r#"{"status":"healthy"}"#));

        coordinator.shutdown();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert!(cleaned_up.load(Ordering::SeqCst));
    }
}
