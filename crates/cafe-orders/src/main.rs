use cafe_orders::config::Config;
use cafe_orders::dashboard::{DashboardSettings, LogNotifier, TerminalBell};
use cafe_orders::lifecycle::{setup_tracing, OrderSystem};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::from_env()?;
    info!(environment = %config.environment, "Starting cafe order server");

    let mut system = OrderSystem::start(&config)?;

    if config.dashboard_enabled {
        let dashboard = system.spawn_dashboard(
            DashboardSettings::from(&config),
            Arc::new(LogNotifier),
            Arc::new(TerminalBell),
        );
        // Headless: log in with the configured password so polling starts.
        if let Err(e) = dashboard.login(config.admin_password.clone()).await {
            error!(error = %e, "Dashboard login failed");
        }
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Listening");
    axum::serve(listener, system.router())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await?;

    system.shutdown().await?;
    info!("Server stopped");
    Ok(())
}
