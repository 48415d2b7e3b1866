use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::Method;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::Application;
use crate::config::ServerConfig;

use super::handlers::AppState;
use super::routes::create_router;

pub struct HttpServer {
    config: ServerConfig,
    app: Arc<Application>,
}

impl HttpServer {
    pub fn new(config: ServerConfig, app: Arc<Application>) -> Self {
        Self { config, app }
    }

    /// Serve until `shutdown` resolves.
    pub async fn run(&self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .listen_addr
            .parse()
            .context("Invalid HTTP listen address")?;

        let mut router = create_router(AppState {
            app: self.app.clone(),
        });

        if self.config.cors_enabled {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any)
                .allow_origin(Any);
            router = router.layer(cors);
        }

        router = router.layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(&addr)
            .await
            .context("Failed to bind HTTP server")?;

        log::info!("[HTTP] Readiness API listening on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                log::info!("[HTTP] Server shutting down");
            })
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}
