//! socket-fiddle server entry point.
//!
//! Serves the demo named by `DEMO` (`fiddle` or `latency`) on `HOST`:`PORT`.

use socket_fiddle::config::{ServerConfig, init_tracing};
use socket_fiddle::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, demo = %config.demo, "starting socket-fiddle");

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    server::run(listener, &config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
    .await?;

    Ok(())
}
