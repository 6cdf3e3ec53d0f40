//! Fiddle demo client.
//!
//! Connects with `token=<AUTH_TOKEN>` (default `my-token`), logs the first
//! event the server sends and disconnects.

use socket_fiddle::client::SimpleClient;
use socket_fiddle::config::{ClientConfig, init_tracing};
use socket_fiddle::session::Auth;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    init_tracing(config.log_format);

    let mut auth = Auth::new();
    auth.insert(
        "token".to_string(),
        config.auth_token.unwrap_or_else(|| "my-token".to_string()),
    );

    let mut client = SimpleClient::connect(&config.server_url, &auth).await?;
    let event = client.receive(config.receive_timeout).await?;
    tracing::info!(%event, "received");
    client.disconnect().await?;

    Ok(())
}
