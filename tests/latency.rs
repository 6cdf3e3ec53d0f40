//! End-to-end tests of the latency demo.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use socket_fiddle::client::{LatencyProbe, SimpleClient, round_trip, run_probes};
use socket_fiddle::demos::{Demo, PING_FROM_CLIENT, PONG_FROM_SERVER};
use socket_fiddle::error::FiddleError;
use socket_fiddle::session::Auth;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

const WAIT: Option<Duration> = Some(Duration::from_secs(5));
const QUIET: Option<Duration> = Some(Duration::from_millis(200));

#[tokio::test]
async fn round_trips_complete_in_sequence() {
    let server = common::spawn(common::config(Demo::Latency, 16)).await;
    let Ok(mut client) = SimpleClient::connect(&server.url(), &Auth::new()).await else {
        panic!("connect failed");
    };
    let mut probe = LatencyProbe::new();

    for round in 1..=5 {
        let Ok(latency) = round_trip(&mut client, &mut probe, WAIT).await else {
            panic!("round {round} failed");
        };
        assert!(latency < Duration::from_secs(5));
        assert_eq!(probe.rounds(), round);
        assert!(!probe.in_flight());
    }
}

#[tokio::test]
async fn shutdown_during_pause_stops_probing() {
    let server = common::spawn(common::config(Demo::Latency, 16)).await;
    let Ok(mut client) = SimpleClient::connect(&server.url(), &Auth::new()).await else {
        panic!("connect failed");
    };
    let mut probe = LatencyProbe::new();

    // Shutdown fires inside the 60 s pause after the first round.
    let run = run_probes(
        &mut client,
        &mut probe,
        Duration::from_secs(60),
        WAIT,
        tokio::time::sleep(Duration::from_millis(300)),
    );
    let Ok(Ok(())) = tokio::time::timeout(Duration::from_secs(5), run).await else {
        panic!("shutdown during the pause was not observed");
    };
    assert_eq!(probe.rounds(), 1);
    assert!(!probe.in_flight());

    let Ok(()) = client.disconnect().await else {
        panic!("disconnect failed");
    };
}

#[tokio::test]
async fn one_pong_per_ping() {
    let server = common::spawn(common::config(Demo::Latency, 16)).await;
    let Ok(mut client) = SimpleClient::connect(&server.url(), &Auth::new()).await else {
        panic!("connect failed");
    };

    for _ in 0..3 {
        let Ok(()) = client.emit(PING_FROM_CLIENT, Vec::new()).await else {
            panic!("emit failed");
        };
    }
    for _ in 0..3 {
        let Ok(event) = client.receive(WAIT).await else {
            panic!("missing pong");
        };
        assert_eq!(event.name(), PONG_FROM_SERVER);
        assert!(event.args().is_empty());
    }
    assert!(matches!(client.receive(QUIET).await, Err(FiddleError::Timeout)));
}

#[tokio::test]
async fn pipelined_pings_each_get_a_pong() {
    const PINGS: usize = 5_000;

    let mut config = common::config(Demo::Latency, 16);
    config.outbound_queue_capacity = 4;
    let server = common::spawn(config).await;
    let url = format!("ws://{}/ws", server.addr);
    let Ok((ws, _)) = connect_async(url.as_str()).await else {
        panic!("connect failed");
    };
    let (mut ws_tx, mut ws_rx) = ws.split();

    let sender = tokio::spawn(async move {
        let ping = json!([PING_FROM_CLIENT]).to_string();
        for _ in 0..PINGS {
            if ws_tx.send(Message::text(ping.as_str())).await.is_err() {
                return false;
            }
        }
        true
    });

    let counted = tokio::time::timeout(Duration::from_secs(30), async {
        let mut pongs = 0;
        while pongs < PINGS {
            match ws_rx.next().await {
                Some(Ok(Message::Text(text))) => {
                    assert_eq!(text.as_str(), r#"["pong_from_server"]"#);
                    pongs += 1;
                }
                Some(Ok(_)) => {}
                _ => break,
            }
        }
        pongs
    })
    .await;

    let Ok(true) = sender.await else {
        panic!("sending pings failed");
    };
    let Ok(pongs) = counted else {
        panic!("timed out waiting for pongs");
    };
    assert_eq!(pongs, PINGS);
}

#[tokio::test]
async fn no_greeting_on_connect() {
    let server = common::spawn(common::config(Demo::Latency, 16)).await;
    let Ok(mut client) = SimpleClient::connect(&server.url(), &Auth::new()).await else {
        panic!("connect failed");
    };
    assert!(matches!(client.receive(QUIET).await, Err(FiddleError::Timeout)));
}

#[tokio::test]
async fn reserved_events_are_not_sent() {
    let server = common::spawn(common::config(Demo::Latency, 16)).await;
    let Ok(mut client) = SimpleClient::connect(&server.url(), &Auth::new()).await else {
        panic!("connect failed");
    };
    assert!(matches!(
        client.emit("disconnect", Vec::new()).await,
        Err(FiddleError::ReservedEvent(_))
    ));
}

#[tokio::test]
async fn malformed_frames_do_not_drop_the_connection() {
    let server = common::spawn(common::config(Demo::Latency, 16)).await;
    let url = format!("ws://{}/ws", server.addr);
    let Ok((mut ws, _)) = connect_async(url.as_str()).await else {
        panic!("connect failed");
    };

    for bad in ["not json", "[]", "[1, 2]", r#"{"event": "ping_from_client"}"#] {
        let Ok(()) = ws.send(Message::text(bad)).await else {
            panic!("send failed");
        };
    }
    let ping = json!([PING_FROM_CLIENT]).to_string();
    let Ok(()) = ws.send(Message::text(ping)).await else {
        panic!("send failed");
    };

    let Some(Ok(Message::Text(text))) = ws.next().await else {
        panic!("expected a text frame");
    };
    assert_eq!(text.as_str(), r#"["pong_from_server"]"#);
}
