use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::model::{AuthStatus, PartyMember, SystemConfig};

/// Streams of authoritative state the console keeps fresh. Each stream has
/// its own staleness lane so a slow config fetch cannot shadow auth results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollStream {
    Config,
    Auth,
    Party,
    Logs,
}

const STREAMS: usize = 4;

impl PollStream {
    fn lane(self) -> usize {
        match self {
            PollStream::Config => 0,
            PollStream::Auth => 1,
            PollStream::Party => 2,
            PollStream::Logs => 3,
        }
    }
}

#[derive(Debug)]
pub enum PollPayload {
    Config(Box<SystemConfig>),
    /// `None` means the auth endpoint is not deployed (no gating applies).
    Auth(Option<AuthStatus>),
    Party(Vec<PartyMember>),
    Logs { service: String, text: String },
}

/// One completed fetch. `seq` is allocated when the request is *issued*, so
/// the applier can drop results superseded by a later request even when they
/// arrive out of order.
#[derive(Debug)]
pub struct PollEvent {
    pub stream: PollStream,
    pub seq: u64,
    pub outcome: Result<PollPayload>,
}

impl PollEvent {
    pub fn next_seq(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Per-stream monotonic admission: an event is applied only if no newer
/// event for the same stream has been applied already.
#[derive(Debug, Default)]
pub struct StaleGate {
    applied: [u64; STREAMS],
}

impl StaleGate {
    pub fn admit(&mut self, stream: PollStream, seq: u64) -> bool {
        let lane = &mut self.applied[stream.lane()];
        if seq <= *lane {
            return false;
        }
        *lane = seq;
        true
    }
}

/// Backend reachability, derived from poll outcomes. Bootstrap is strict
/// (the very first failure reports offline); an established session only
/// degrades after a sustained run of misses so one dropped poll does not
/// flap the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnState {
    Connecting,
    Online,
    Offline,
}

const OFFLINE_AFTER: u32 = 3;

#[derive(Debug)]
pub struct ConnHealth {
    state: ConnState,
    ever_online: bool,
    misses: u32,
}

impl Default for ConnHealth {
    fn default() -> Self {
        Self {
            state: ConnState::Connecting,
            ever_online: false,
            misses: 0,
        }
    }
}

impl ConnHealth {
    pub fn state(&self) -> ConnState {
        self.state
    }

    pub fn on_success(&mut self) {
        self.state = ConnState::Online;
        self.ever_online = true;
        self.misses = 0;
    }

    pub fn on_failure(&mut self) {
        if !self.ever_online {
            self.state = ConnState::Offline;
            return;
        }
        self.misses += 1;
        if self.misses >= OFFLINE_AFTER {
            self.state = ConnState::Offline;
        }
    }
}

/// Repeating background fetcher. The tick closure owns the actual fetching
/// and delivery (typically: issue requests, send `PollEvent`s down an mpsc
/// channel); it returns `false` when the receiving side is gone.
///
/// The first tick runs immediately so initial render does not wait out an
/// interval boundary. `stop` is idempotent and does not abort an in-flight
/// tick; late results are discarded by the `StaleGate` or the closed channel.
pub struct Poller {
    stop: Arc<AtomicBool>,
}

impl Poller {
    pub fn start(interval: Duration, mut tick: impl FnMut() -> bool + Send + 'static) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        thread::spawn(move || {
            loop {
                if flag.load(Ordering::Relaxed) {
                    return;
                }
                if !tick() {
                    return;
                }

                // Sleep in short slices so stop() takes effect promptly.
                let mut slept = Duration::ZERO;
                while slept < interval {
                    if flag.load(Ordering::Relaxed) {
                        return;
                    }
                    let step = Duration::from_millis(25).min(interval - slept);
                    thread::sleep(step);
                    slept += step;
                }
            }
        });

        Self { stop }
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn gate_rejects_stale_and_admits_newer() {
        let mut gate = StaleGate::default();
        assert!(gate.admit(PollStream::Config, 1));
        assert!(gate.admit(PollStream::Config, 3));
        // Fetch issued earlier, completed later.
        assert!(!gate.admit(PollStream::Config, 2));
        assert!(!gate.admit(PollStream::Config, 3));
        assert!(gate.admit(PollStream::Config, 4));
    }

    #[test]
    fn gate_lanes_are_independent() {
        let mut gate = StaleGate::default();
        assert!(gate.admit(PollStream::Config, 5));
        assert!(gate.admit(PollStream::Auth, 1));
        assert!(!gate.admit(PollStream::Config, 4));
        assert!(gate.admit(PollStream::Auth, 2));
    }

    #[test]
    fn seq_counter_is_monotonic() {
        let counter = AtomicU64::new(0);
        let a = PollEvent::next_seq(&counter);
        let b = PollEvent::next_seq(&counter);
        assert!(b > a);
    }

    #[test]
    fn health_first_bootstrap_failure_is_offline() {
        let mut h = ConnHealth::default();
        assert_eq!(h.state(), ConnState::Connecting);
        h.on_failure();
        assert_eq!(h.state(), ConnState::Offline);
        h.on_success();
        assert_eq!(h.state(), ConnState::Online);
    }

    #[test]
    fn health_established_session_tolerates_transient_misses() {
        let mut h = ConnHealth::default();
        h.on_success();

        h.on_failure();
        h.on_failure();
        assert_eq!(h.state(), ConnState::Online);

        h.on_failure();
        assert_eq!(h.state(), ConnState::Offline);

        h.on_success();
        assert_eq!(h.state(), ConnState::Online);
    }

    #[test]
    fn poller_ticks_immediately_and_stop_is_idempotent() {
        let (tx, rx) = mpsc::channel();
        let poller = Poller::start(Duration::from_secs(60), move || tx.send(()).is_ok());

        // First tick fires without waiting for the interval.
        rx.recv_timeout(Duration::from_secs(1))
            .expect("immediate tick");

        poller.stop();
        poller.stop();

        // Stopping before start of the next interval: no further ticks.
        assert!(rx.recv_timeout(Duration::from_millis(150)).is_err());
    }

    #[test]
    fn poller_stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel();
        let _poller = Poller::start(Duration::from_millis(1), move || tx.send(()).is_ok());
        rx.recv_timeout(Duration::from_secs(1)).expect("first tick");
        drop(rx);
        // The worker notices the closed channel on its next tick and exits;
        // nothing to assert beyond not hanging.
        thread::sleep(Duration::from_millis(20));
    }
}
