//! Round-trip latency measurement.

use std::future::Future;
use std::time::{Duration, Instant};

use super::SimpleClient;
use crate::demos::{PING_FROM_CLIENT, PONG_FROM_SERVER};
use crate::error::FiddleError;

/// Holds the send time of the probe in flight.
///
/// A latency is only produced by [`LatencyProbe::complete`] after a matching
/// [`LatencyProbe::start`], and is never negative.
#[derive(Debug, Default)]
pub struct LatencyProbe {
    sent_at: Option<Instant>,
    last: Option<Duration>,
    rounds: u64,
}

impl LatencyProbe {
    /// Creates an idle probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the send time. Restarting discards the previous send time.
    pub fn start(&mut self) -> Instant {
        let now = Instant::now();
        self.sent_at = Some(now);
        now
    }

    /// Returns the time elapsed since [`LatencyProbe::start`] and clears it.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::NoProbeInFlight`] if no probe was started.
    pub fn complete(&mut self) -> Result<Duration, FiddleError> {
        let sent_at = self.sent_at.take().ok_or(FiddleError::NoProbeInFlight)?;
        let latency = sent_at.elapsed();
        self.last = Some(latency);
        self.rounds += 1;
        Ok(latency)
    }

    /// Returns `true` while waiting for a reply.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.sent_at.is_some()
    }

    /// Latency of the last completed round.
    #[must_use]
    pub const fn last(&self) -> Option<Duration> {
        self.last
    }

    /// Number of completed rounds.
    #[must_use]
    pub const fn rounds(&self) -> u64 {
        self.rounds
    }
}

/// Runs one probe round: emit `ping_from_client`, wait for
/// `pong_from_server`, return the elapsed time.
///
/// Other events received while waiting are skipped. With `timeout = None`
/// a lost reply waits forever.
///
/// # Errors
///
/// Returns [`FiddleError::Timeout`] if a wait exceeds `timeout`,
/// [`FiddleError::Disconnected`] if the connection closes, or a transport
/// error if the probe cannot be sent.
pub async fn round_trip(
    client: &mut SimpleClient,
    probe: &mut LatencyProbe,
    timeout: Option<Duration>,
) -> Result<Duration, FiddleError> {
    probe.start();
    client.emit(PING_FROM_CLIENT, Vec::new()).await?;
    loop {
        let event = client.receive(timeout).await?;
        if event.name() == PONG_FROM_SERVER {
            return probe.complete();
        }
        tracing::debug!(event = event.name(), "skipping while waiting for pong");
    }
}

/// Repeats [`round_trip`] every `interval` until `shutdown` resolves,
/// logging each latency.
///
/// `shutdown` is polled during both the round trip and the pause between
/// rounds.
///
/// # Errors
///
/// Returns the first error from [`round_trip`].
pub async fn run_probes<F>(
    client: &mut SimpleClient,
    probe: &mut LatencyProbe,
    interval: Duration,
    timeout: Option<Duration>,
    shutdown: F,
) -> Result<(), FiddleError>
where
    F: Future<Output = ()>,
{
    let mut shutdown = std::pin::pin!(shutdown);
    loop {
        let result = tokio::select! {
            result = round_trip(&mut *client, &mut *probe, timeout) => result,
            () = &mut shutdown => return Ok(()),
        };
        let latency = result?;
        tracing::info!(
            latency_ms = %format!("{:.2}", latency.as_secs_f64() * 1000.0),
            round = probe.rounds(),
            "latency"
        );
        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            () = &mut shutdown => return Ok(()),
        }
    }
}
