//! Activity service startup.

use std::sync::Arc;

use kibun_shared::signal::shutdown_signal;
use tokio::net::TcpListener;

use super::router::build_router;
use crate::{config::ActivityConfig, error::ActivityServerError, store::ActivityStore};

pub async fn run(config: ActivityConfig) -> Result<(), ActivityServerError> {
    let app = build_router(Arc::new(ActivityStore::new()));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ActivityServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Activity tracking API listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ActivityServerError::Serve)?;

    tracing::info!("Activity tracking API stopped");
    Ok(())
}
