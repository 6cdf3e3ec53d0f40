//! Latency demo client.
//!
//! Sends `ping_from_client`, waits for `pong_from_server`, logs the round
//! trip and repeats every `PING_INTERVAL_MS` (default 1000).

use socket_fiddle::client::{LatencyProbe, SimpleClient, run_probes};
use socket_fiddle::config::{ClientConfig, init_tracing};
use socket_fiddle::session::Auth;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    init_tracing(config.log_format);

    let mut auth = Auth::new();
    if let Some(token) = config.auth_token {
        auth.insert("token".to_string(), token);
    }

    let mut client = SimpleClient::connect(&config.server_url, &auth).await?;
    let mut probe = LatencyProbe::new();

    run_probes(
        &mut client,
        &mut probe,
        config.ping_interval,
        config.receive_timeout,
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        },
    )
    .await?;

    client.disconnect().await?;
    Ok(())
}
