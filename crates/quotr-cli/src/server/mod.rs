//! HTTP API: extraction proxy plus read and append access to the working set.

pub mod error;
pub mod handlers;
pub mod routing;
pub mod state;
pub mod types;

use tokio::net::TcpListener;
use tracing::info;

pub use routing::create_router;
pub use state::AppState;

/// Bind `addr` and serve until the process is stopped.
pub async fn start_server(addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
