//! Web layer module
//!
//! HTTP interface for the IPTV Gateway. Handlers are thin: each rebuilds
//! the channel directory from disk and delegates to the rendering and
//! aggregation modules. Every route answers 200; failure modes degrade to
//! empty, default, or placeholder bodies rather than error responses.

use std::net::SocketAddr;

use anyhow::Result;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;

pub mod handlers;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = create_router(AppState { config });

        Ok(Self { app, addr })
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/playlist.m3u", get(handlers::playlist))
        .route("/playlist_raw.m3u", get(handlers::playlist_raw))
        .route("/epg.xml", get(handlers::epg))
        .route("/channels.json", get(handlers::channels_json))
        .route("/health", get(handlers::health))
        // Middleware (applied in reverse order)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
