//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use credit_types::{CreditRepository, CustomerRepository};

use super::handlers::{self, AppState};
use crate::{CreditService, CustomerService};

/// HTTP Server for the Credit API.
pub struct HttpServer<C: CustomerRepository, K: CreditRepository> {
    state: Arc<AppState<C, K>>,
}

impl<C: CustomerRepository, K: CreditRepository> HttpServer<C, K> {
    /// Creates a new HTTP server with the given services.
    pub fn new(customers: CustomerService<C>, credits: CreditService<K>) -> Self {
        Self {
            state: Arc::new(AppState { customers, credits }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/customers", post(handlers::create_customer::<C, K>))
            .route(
                "/api/customers/{id}",
                get(handlers::get_customer::<C, K>).patch(handlers::update_customer::<C, K>),
            )
            .route(
                "/api/credits",
                post(handlers::create_credit::<C, K>).get(handlers::list_credits::<C, K>),
            )
            .route("/api/credits/{code}", get(handlers::get_credit::<C, K>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
