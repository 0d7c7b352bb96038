//! HTTP server implementation
//!
//! Sets up the Axum HTTP server with:
//! - Todo CRUD routes
//! - Middleware (logging, metrics, timeout)
//! - Graceful shutdown with a bounded grace period

use axum::middleware;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::metrics;
use crate::routes;
use crate::storage::TodoStore;

/// HTTP server for the todo service
pub struct Server {
    config: Config,
    store: Arc<dyn TodoStore>,
}

impl Server {
    /// Create a new server instance
    pub fn new(
        config: Config,
        store: Arc<dyn TodoStore>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self { config, store })
    }

    /// Build the Axum router with all middleware
    fn build_router(&self) -> Router {
        routes::create_router(self.store.clone())
            .layer(
                ServiceBuilder::new()
                    // Add request tracing
                    .layer(TraceLayer::new_for_http())
                    // Add timeout
                    .layer(TimeoutLayer::new(
                        Duration::from_secs(self.config.server.timeout_secs),
                    ))
                    // Record request count and latency
                    .layer(middleware::from_fn(metrics::track_metrics))
                    .into_inner(),
            )
    }

    /// Start the server and run until the shutdown future resolves
    ///
    /// The listener runs on a background task. Once the shutdown future
    /// resolves the listener stops accepting new connections and in-flight
    /// requests get the configured grace period to finish; after that the
    /// serve task is aborted.
    pub async fn start<F>(&self, shutdown: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.config.server.bind_address).await?;
        info!(address = %self.config.server.bind_address, "Server listening");

        let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
        let mut serve_task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = drain_rx.await;
                })
                .await
        });

        tokio::select! {
            _ = shutdown => {
                info!("Draining in-flight requests");
                let _ = drain_tx.send(());

                let grace = Duration::from_secs(self.config.server.grace_period_secs);
                match tokio::time::timeout(grace, &mut serve_task).await {
                    Ok(joined) => joined??,
                    Err(_) => {
                        warn!(
                            grace_secs = self.config.server.grace_period_secs,
                            "Grace period expired, aborting listener"
                        );
                        serve_task.abort();
                    }
                }
            }
            // listener failed before any shutdown was requested
            joined = &mut serve_task => joined??,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::storage::memory::MemoryTodoStore;

    #[tokio::test]
    async fn test_router_serves_home_and_health_through_middleware() {
        let server = Server::new(Config::default(), Arc::new(MemoryTodoStore::new())).unwrap();
        let app = server.build_router();

        for uri in ["/", "/healthz"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "route {uri}");
        }
    }
}
