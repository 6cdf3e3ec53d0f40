//! Server and client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::demos::Demo;
use crate::error::FiddleError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Server configuration.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the HTTP server to (`HOST`:`PORT`).
    pub listen_addr: SocketAddr,

    /// Demo served by this process.
    pub demo: Demo,

    /// Directory holding the demo pages and `/static` assets.
    pub static_dir: PathBuf,

    /// Capacity of each session's outbound queue.
    pub outbound_queue_capacity: usize,

    /// Maximum number of concurrent WebSocket sessions.
    pub max_connections: usize,

    /// Timeout for plain HTTP requests.
    pub http_request_timeout: Duration,

    /// Log output format.
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::Config`] if `HOST` or `PORT` cannot be parsed
    /// or `DEMO` names an unknown demo.
    pub fn from_env() -> Result<Self, FiddleError> {
        dotenvy::dotenv().ok();

        let host: IpAddr = std::env::var("HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse()
            .map_err(|e| FiddleError::Config(format!("HOST: {e}")))?;
        let port: u16 = match std::env::var("PORT") {
            Ok(v) => v
                .parse()
                .map_err(|e| FiddleError::Config(format!("PORT: {e}")))?,
            Err(_) => 5000,
        };

        let demo: Demo = std::env::var("DEMO")
            .unwrap_or_else(|_| "fiddle".to_string())
            .parse()?;

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            demo,
            static_dir,
            outbound_queue_capacity: parse_env("OUTBOUND_QUEUE_CAPACITY", 64),
            max_connections: parse_env("MAX_CONNECTIONS", 1024),
            http_request_timeout: Duration::from_secs(parse_env("HTTP_REQUEST_TIMEOUT_SECS", 30)),
            log_format: log_format_from_env(),
        })
    }
}

/// Client configuration shared by the demo client binaries.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (`http://`, `https://`, `ws://` or `wss://`).
    pub server_url: String,

    /// Optional token sent as `?token=` during the handshake.
    pub auth_token: Option<String>,

    /// Delay between latency probes.
    pub ping_interval: Duration,

    /// How long to wait for a server event; `None` waits forever.
    pub receive_timeout: Option<Duration>,

    /// Log output format.
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server_url: std::env::var("SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            auth_token: std::env::var("AUTH_TOKEN").ok().filter(|t| !t.is_empty()),
            ping_interval: Duration::from_millis(parse_env("PING_INTERVAL_MS", 1000)),
            receive_timeout: std::env::var("RECEIVE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
            log_format: log_format_from_env(),
        }
    }
}

/// Installs the global `tracing` subscriber.
///
/// Honors `RUST_LOG` (default `info`).
pub fn init_tracing(format: LogFormat) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn log_format_from_env() -> LogFormat {
    match std::env::var("LOG_FORMAT").ok().as_deref() {
        Some("json") | Some("JSON") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
