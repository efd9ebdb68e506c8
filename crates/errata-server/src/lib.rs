//! axum integration for the error dispatcher
//!
//! Handlers return [`HandlerError`]; the dispatch middleware turns it into
//! the JSON error response chosen by the [`Dispatcher`].

mod catalog;
mod dispatch;
mod error;
mod health;
mod preview;
mod request_context;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use errata_config::Config;
use errata_dispatch::Dispatcher;
use tower_http::trace::TraceLayer;

pub use catalog::build_registry;
pub use error::{HandlerError, ServerError};
pub use preview::PreviewError;

/// Preview server with every configured error reachable over HTTP
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the error registry cannot be built
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

        let dispatcher = Arc::new(Dispatcher::new(build_registry(config)?));

        let mut app = Router::new()
            .route("/errors/{name}", get(preview::preview_handler))
            .route("/errors/{name}/direct", get(preview::preview_direct_handler));

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        // Apply middleware layers (innermost first)
        let app = with_dispatch(app, dispatcher)
            .layer(axum::middleware::from_fn(request_context::request_context_middleware))
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Route handler errors in `router` through `dispatcher`
///
/// Must be layered inside the request-context middleware so dispatch logs
/// carry the request id.
pub fn with_dispatch(router: Router, dispatcher: Arc<Dispatcher>) -> Router {
    router.layer(axum::middleware::from_fn_with_state(
        dispatcher,
        dispatch::dispatch_middleware,
    ))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use errata_config::ErrorConfig;
    use errata_core::REQUEST_ID_HEADER;
    use http::header::CONTENT_TYPE;
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        let mut config = Config::default();
        config.errors.insert(
            "not_found".to_string(),
            ErrorConfig {
                status: 404,
                message: "resource missing".to_string(),
            },
        );

        Server::new(&config).unwrap().into_router()
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, http::HeaderMap, serde_json::Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, headers, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn wrapped_sentinel_is_mapped() {
        let (status, headers, body) = get(router(), "/errors/not_found").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(body, serde_json::json!({"status-code": 404, "message": "resource missing"}));
    }

    #[tokio::test]
    async fn unknown_name_is_generic() {
        let (status, _, body) = get(router(), "/errors/unheard_of").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"status-code": 500, "message": "something went wrong"}));
    }

    #[tokio::test]
    async fn direct_descriptor_wins() {
        let (status, _, body) = get(router(), "/errors/not_found/direct?status=418&message=teapot").await;

        assert_eq!(status, StatusCode::IM_A_TEAPOT);
        assert_eq!(body, serde_json::json!({"status-code": 418, "message": "teapot"}));
    }

    #[tokio::test]
    async fn direct_rejects_invalid_status() {
        let (status, _, body) = get(router(), "/errors/not_found/direct?status=7&message=nope").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid status code 7");
    }

    #[tokio::test]
    async fn direct_rejects_informational_status() {
        let (status, headers, body) = get(router(), "/errors/not_found/direct?status=103&message=hints").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(body, serde_json::json!({"status-code": 400, "message": "invalid status code 103"}));
    }

    #[tokio::test]
    async fn direct_query_rejection_is_rendered_as_json() {
        let (status, headers, body) = get(router(), "/errors/not_found/direct").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(body["status-code"], 400);
        assert!(body["message"].as_str().is_some_and(|m| m.contains("status")), "{body}");
    }

    #[tokio::test]
    async fn anyhow_handler_errors_are_mapped() {
        async fn lookup() -> Result<(), HandlerError> {
            let result: anyhow::Result<()> =
                Err(anyhow::Error::new(errata_core::Sentinel::new("not_found")).context("lookup failed"));
            result.map_err(HandlerError::from_anyhow)
        }

        let mut config = Config::default();
        config.errors.insert(
            "not_found".to_string(),
            ErrorConfig {
                status: 404,
                message: "resource missing".to_string(),
            },
        );
        let dispatcher = Arc::new(Dispatcher::new(build_registry(&config).unwrap()));
        let router = with_dispatch(Router::new().route("/lookup", axum::routing::get(lookup)), dispatcher);

        let (status, _, body) = get(router, "/lookup").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"status-code": 404, "message": "resource missing"}));
    }

    #[tokio::test]
    async fn successful_responses_pass_through() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(CONTENT_TYPE).is_some_and(|v| v != "application/json"));
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let response = router()
            .oneshot(
                Request::get("/errors/not_found")
                    .header(REQUEST_ID_HEADER, "req-9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-9");
    }

    #[test]
    fn invalid_registry_fails_construction() {
        let mut config = Config::default();
        config.errors.insert(
            "redirect".to_string(),
            ErrorConfig {
                status: 302,
                message: "moved".to_string(),
            },
        );

        let Err(err) = Server::new(&config) else {
            panic!("server built with an out-of-range status");
        };
        assert!(err.to_string().contains("failed to build error registry"), "{err}");
    }
}
