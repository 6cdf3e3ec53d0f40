//! Minimal event client over `tokio-tungstenite`.
//!
//! Incoming events are buffered by a background reader task and handed out
//! in arrival order by [`SimpleClient::receive`].

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use crate::error::FiddleError;
use crate::protocol::Event;
use crate::session::{Auth, SessionId};
use crate::ws::SESSION_ID_HEADER;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Connected event client.
pub struct SimpleClient {
    sid: Option<SessionId>,
    ws_write: WsSink,
    inbox: mpsc::UnboundedReceiver<Event>,
    reader: JoinHandle<()>,
}

impl fmt::Debug for SimpleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleClient")
            .field("sid", &self.sid)
            .finish_non_exhaustive()
    }
}

impl SimpleClient {
    /// Connects to `url` (`http(s)://host:port` or `ws(s)://host:port`),
    /// sending `auth` as query parameters of the handshake.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::Config`] for an unsupported URL scheme and
    /// [`FiddleError::Transport`] if the handshake fails.
    pub async fn connect(url: &str, auth: &Auth) -> Result<Self, FiddleError> {
        let endpoint = endpoint_url(url, auth)?;
        let (ws_stream, response) = connect_async(endpoint.as_str()).await?;

        let sid = response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        tracing::info!(url = %endpoint, sid = ?sid, "connected");

        let (ws_write, ws_read) = ws_stream.split();
        let (tx, inbox) = mpsc::unbounded_channel();
        let reader = tokio::spawn(read_loop(ws_read, tx));

        Ok(Self {
            sid,
            ws_write,
            inbox,
            reader,
        })
    }

    /// Session ID assigned by the server, if it sent one.
    #[must_use]
    pub const fn sid(&self) -> Option<SessionId> {
        self.sid
    }

    /// Emits an event to the server.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::ReservedEvent`] for lifecycle names and
    /// [`FiddleError::Transport`] if the frame cannot be written.
    pub async fn emit(&mut self, name: &str, args: Vec<Value>) -> Result<(), FiddleError> {
        let text = Event::outgoing(name, args)?.encode()?;
        self.ws_write.send(Message::text(text)).await?;
        Ok(())
    }

    /// Waits for the next event from the server.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::Timeout`] if nothing arrives within `timeout`
    /// and [`FiddleError::Disconnected`] once the connection is closed and
    /// the buffer is drained.
    pub async fn receive(&mut self, timeout: Option<Duration>) -> Result<Event, FiddleError> {
        let next = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.inbox.recv())
                .await
                .map_err(|_| FiddleError::Timeout)?,
            None => self.inbox.recv().await,
        };
        next.ok_or(FiddleError::Disconnected)
    }

    /// Closes the connection.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::Transport`] if the close frame cannot be sent.
    pub async fn disconnect(mut self) -> Result<(), FiddleError> {
        self.ws_write.send(Message::Close(None)).await?;
        tracing::info!(sid = ?self.sid, "disconnected");
        Ok(())
    }
}

impl Drop for SimpleClient {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

/// Buffers decoded server events until the stream ends.
async fn read_loop(mut ws_read: WsStream, tx: mpsc::UnboundedSender<Event>) {
    while let Some(msg) = ws_read.next().await {
        match msg {
            Ok(Message::Text(text)) => match Event::decode(&text) {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "malformed frame ignored"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "ws read failed");
                break;
            }
        }
    }
}

/// Builds the WebSocket endpoint URL for a server base URL.
///
/// Maps `http`/`https` to `ws`/`wss`, appends a `ws` path segment unless
/// present and adds `auth` to any existing query, sorted by key.
fn endpoint_url(base: &str, auth: &Auth) -> Result<Url, FiddleError> {
    let mut url =
        Url::parse(base).map_err(|e| FiddleError::Config(format!("invalid url {base}: {e}")))?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(FiddleError::Config(format!("unsupported scheme: {other}"))),
    };
    url.set_scheme(scheme)
        .map_err(|()| FiddleError::Config(format!("cannot use {scheme} for {base}")))?;

    let has_ws_segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        == Some("ws");
    if !has_ws_segment {
        url.path_segments_mut()
            .map_err(|()| FiddleError::Config(format!("url cannot have a path: {base}")))?
            .pop_if_empty()
            .push("ws");
    }

    if !auth.is_empty() {
        let params: BTreeMap<&String, &String> = auth.iter().collect();
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}
