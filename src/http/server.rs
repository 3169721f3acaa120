//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the upstream forwarder and resolve the routing table
//! - Create Axum Router with one route per table entry
//! - Wire up middleware (CORS, request ID, tracing, body limit)
//! - Serve on a listener until shutdown

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, Method, Request};
use axum::routing::{get, on, MethodFilter};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::relay::{ForwarderError, UpstreamForwarder};
use crate::routing::{resolve_routes, ResolvedRoute};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: UpstreamForwarder,
    pub greeting: Arc<str>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Forwarder(#[from] ForwarderError),
    #[error("invalid upstream base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("route '{route}' uses unsupported method {method}")]
    Method { route: &'static str, method: Method },
}

/// HTTP server for the PBX relay.
pub struct HttpServer {
    config: RelayConfig,
    forwarder: UpstreamForwarder,
    routes: Vec<(Arc<ResolvedRoute>, MethodFilter)>,
}

impl HttpServer {
    /// Build the forwarder and resolve every route. No I/O happens here.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let forwarder = UpstreamForwarder::new(&config.upstream)?;

        let routes = resolve_routes(&config.upstream.base_url)?
            .into_iter()
            .map(|route| {
                let filter = MethodFilter::try_from(route.spec.method.clone()).map_err(|_| ServerError::Method {
                    route: route.spec.name,
                    method: route.spec.method.clone(),
                })?;
                Ok((Arc::new(route), filter))
            })
            .collect::<Result<Vec<_>, ServerError>>()?;

        for (route, _) in &routes {
            tracing::debug!(
                route = route.spec.name,
                method = %route.spec.method,
                inbound = route.spec.inbound_path,
                upstream = %route.upstream_url,
                "Route registered"
            );
        }

        Ok(Self {
            config,
            forwarder,
            routes,
        })
    }

    /// Build the Axum router. `port` is only used in the greeting text.
    pub fn router(&self, port: u16) -> Router {
        let state = AppState {
            forwarder: self.forwarder.clone(),
            greeting: format!("Hello, this is the PBX relay running on port {port}!").into(),
        };

        let mut router = Router::new().route("/", get(handlers::greeting));
        for (route, filter) in &self.routes {
            let path = route.spec.inbound_path;
            let route = route.clone();
            let handler = move |State(state): State<AppState>, headers: HeaderMap, body: Bytes| {
                let route = route.clone();
                async move { handlers::relay(state, &route, headers, body).await }
            };
            router = router.route(path, on(*filter, handler));
        }

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        router
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(self.config.listener.max_body_bytes))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            path = %req.uri().path(),
                            request_id = %request_id(req.headers()),
                        )
                    }))
                    .layer(propagate_request_id_layer())
                    .layer(cors),
            )
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let app = self.router(addr.port());

        tracing::info!(address = %addr, "Server is running on port {}", addr.port());

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
