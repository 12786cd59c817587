//! HTTP listener and routing.
//!
//! Requests whose path starts with `/api/` go to the JSON endpoints in
//! [`api`]; everything else is a static file lookup. Every response carries
//! the same permissive CORS headers, and `OPTIONS` under `/api/` is answered
//! with an empty 204 before any routing happens. POST bodies are buffered
//! whole with no size limit.

pub mod api;
pub mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info, warn};

use crate::assets::StaticFiles;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::state::{now_iso, ServerState};
use crate::store::FileStore;

/// Prefix routed to the JSON endpoints.
pub const API_PREFIX: &str = "/api/";

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Counters reported by `/api/status`.
    pub server: Arc<ServerState>,
    /// JSON file store.
    pub store: Arc<FileStore>,
    /// Static file resolver.
    pub assets: Arc<StaticFiles>,
}

impl AppState {
    /// Build fresh state from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            Arc::new(ServerState::new()),
            FileStore::from_config(config),
            StaticFiles::from_config(config),
        )
    }

    /// Build state from existing parts.
    #[must_use]
    pub fn from_parts(server: Arc<ServerState>, store: FileStore, assets: StaticFiles) -> Self {
        Self {
            server,
            store: Arc::new(store),
            assets: Arc::new(assets),
        }
    }
}

/// Whether a path belongs to the API.
#[must_use]
pub fn is_api_path(path: &str) -> bool {
    path.starts_with(API_PREFIX)
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", any(api::status))
        .route(
            "/api/data",
            get(api::get_data)
                .post(api::post_data)
                .fallback(api::not_found),
        )
        .route("/api/weather", any(api::weather))
        .route(
            "/api/activity",
            get(api::get_activity)
                .post(api::post_activity)
                .fallback(api::not_found),
        )
        .route("/api/*rest", any(api::not_found))
        .fallback(serve_static)
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(answer_preflight))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Log every request before it is dispatched.
async fn log_request(req: Request, next: Next) -> Response {
    info!(
        method = %req.method(),
        path = %req.uri().path(),
        timestamp = %now_iso(),
        "request"
    );
    next.run(req).await
}

/// Short-circuit CORS preflight for API paths.
async fn answer_preflight(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS && is_api_path(req.uri().path()) {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(req).await
}

/// Fallback for every non-API path.
async fn serve_static(State(app): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    if is_api_path(path) {
        return Error::not_found(path).into_response();
    }

    match app.assets.load(path).await {
        Ok(asset) => {
            app.server.record_request();
            info!(
                path,
                file = %asset.path.display(),
                bytes = asset.bytes.len(),
                timestamp = %now_iso(),
                "served"
            );
            ([(CONTENT_TYPE, asset.content_type)], asset.bytes).into_response()
        }
        Err(err) => {
            if err.is_not_found() {
                warn!(path, error = %err, timestamp = %now_iso(), "static file not found");
            }
            err.into_response()
        }
    }
}

/// Bind the listen socket.
///
/// # Errors
///
/// Returns [`Error::AddressInUse`] if another process holds the port, or
/// [`Error::Bind`] for any other failure.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let addr = config.listen_addr();
    TcpListener::bind(&addr).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::AddrInUse {
            Error::AddressInUse {
                addr: addr.clone(),
                port: config.server.port,
            }
        } else {
            Error::Bind {
                addr: addr.clone(),
                source,
            }
        }
    })
}

/// Serve `state` on an already-bound listener until interrupted.
///
/// # Errors
///
/// Returns an error if the server loop fails.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| Error::Server(err.to_string()))?;
    info!("server stopped");
    Ok(())
}

/// Bind and serve using `config`.
///
/// # Errors
///
/// Returns an error if binding or serving fails.
pub async fn run(config: &Config) -> Result<()> {
    let listener = bind(config).await?;
    let addr = listener.local_addr()?;
    info!(%addr, root = %config.root().display(), "listening");
    serve(listener, AppState::new(config)).await
}

/// Resolves on the first interrupt signal.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to install interrupt handler");
        std::future::pending::<()>().await;
    }
    info!("interrupt received, shutting down");
}

/// Startup banner shown by the `serve` command.
#[must_use]
pub fn banner(config: &Config, addr: SocketAddr) -> String {
    let url = format!("http://{}:{}", config.server.host, addr.port());
    let mut lines = vec![
        "Mission Control".to_string(),
        "===============".to_string(),
        format!("Dashboard:  {url}/"),
        format!("Root:       {}", config.root().display()),
        String::new(),
        "API endpoints:".to_string(),
    ];
    for endpoint in [
        "GET       /api/status",
        "GET|POST  /api/data",
        "GET       /api/weather",
        "GET|POST  /api/activity",
    ] {
        lines.push(format!("  {endpoint}"));
    }
    lines.push(String::new());
    lines.push("Press Ctrl+C to stop.".to_string());
    lines.join("\n")
}

/// What to tell the user when the port is taken.
#[must_use]
pub fn address_in_use_help(port: u16) -> String {
    format!(
        "Port {port} is already in use.\n\
         \x20 - Find the process holding it: lsof -i :{port}\n\
         \x20 - Stop it, or start on another port: mission-control serve --port <PORT>"
    )
}
