//! Serving an application.
//!
//! # Responsibilities
//! - Run startup hooks before traffic is accepted
//! - Serve the router with graceful shutdown
//! - Run the shutdown hook after in-flight requests drained
//!
//! # Design Decisions
//! - The caller owns the listener and the shutdown trigger; this module
//!   installs no signal handlers
//! - The shutdown hook runs even when serving failed

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::http::app::Application;
use crate::lifecycle::StartupError;
use crate::scheduler::SchedulerError;

/// Error type for serving.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error("shutdown did not complete cleanly: {0}")]
    Shutdown(#[from] SchedulerError),
}

/// Bind every interface on `port`.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await
}

/// Serve `app` on `listener` until `signal` resolves.
pub async fn serve<F>(app: Application, listener: TcpListener, signal: F) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let (router, lifecycle) = app.into_parts();

    lifecycle.startup().await?;

    tracing::info!(address = %addr, "HTTP server starting");
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .await;
    tracing::info!("HTTP server stopped");

    let closed = lifecycle.shutdown().await;
    served?;
    closed?;

    tracing::info!("Shutdown complete");
    Ok(())
}
