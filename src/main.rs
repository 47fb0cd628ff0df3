use clap::Parser;
use tracing::{info, warn};

use user_registry::app_system::{setup_tracing, UserSystem};
use user_registry::config::{Args, ServiceConfig};
use user_registry::gateway::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let args = Args::parse();
    let config = ServiceConfig::from(&args);

    info!(listen = %config.listen_addr, "Starting user registry");

    let system = UserSystem::new(&config);
    let app = create_router(AppState::new(system.user_client.clone()));
    let shutdown_client = system.user_client.clone();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
            // Stopping the actor ends open subscription streams, otherwise
            // their connections would keep the server alive.
            if let Err(e) = shutdown_client.shutdown().await {
                warn!(error = %e, "User actor already stopped");
            }
        })
        .await?;

    system.shutdown().await?;

    info!("User registry stopped");
    Ok(())
}
