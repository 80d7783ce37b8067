mod common;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::json;

use realmdeck::model::{Archetype, AudioRegistry, SystemConfig};
use realmdeck::remote::RemoteClient;
use realmdeck::sync::{
    ConnHealth, ConnState, EditableBinding, PollEvent, PollPayload, PollStream, Poller, StaleGate,
};

use common::BackendState;

/// The console's poll tick: config then auth, sequence numbers allocated at
/// issue time, results delivered over the channel.
fn start_poller(
    client: RemoteClient,
    tx: mpsc::Sender<PollEvent>,
    seq: Arc<AtomicU64>,
    interval: Duration,
) -> Poller {
    Poller::start(interval, move || {
        let config_seq = PollEvent::next_seq(&seq);
        let config = client
            .fetch_config()
            .map(|c| PollPayload::Config(Box::new(c)));
        if tx
            .send(PollEvent {
                stream: PollStream::Config,
                seq: config_seq,
                outcome: config,
            })
            .is_err()
        {
            return false;
        }

        let auth_seq = PollEvent::next_seq(&seq);
        let auth = client.auth_status().map(PollPayload::Auth);
        tx.send(PollEvent {
            stream: PollStream::Auth,
            seq: auth_seq,
            outcome: auth,
        })
        .is_ok()
    })
}

fn wait_for_config(
    rx: &mpsc::Receiver<PollEvent>,
    gate: &mut StaleGate,
    timeout: Duration,
) -> Option<SystemConfig> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        let wait = deadline.saturating_duration_since(Instant::now());
        let Ok(event) = rx.recv_timeout(wait) else {
            return None;
        };
        if !gate.admit(event.stream, event.seq) {
            continue;
        }
        if let Ok(PollPayload::Config(config)) = event.outcome {
            return Some(*config);
        }
    }
    None
}

#[test]
fn first_fetch_arrives_before_the_first_interval() -> Result<()> {
    let server = common::spawn_server(BackendState::default())?;
    let client = RemoteClient::new(&server.base_url)?;
    let (tx, rx) = mpsc::channel();
    let seq = Arc::new(AtomicU64::new(0));

    // A one-hour interval: only the immediate bootstrap fetch can deliver.
    let poller = start_poller(client, tx, seq, Duration::from_secs(3600));

    let mut gate = StaleGate::default();
    let config = wait_for_config(&rx, &mut gate, Duration::from_secs(5))
        .expect("bootstrap fetch delivers without waiting for the interval");
    assert_eq!(config.active_campaign, "the_collision_stone");

    poller.stop();
    Ok(())
}

#[test]
fn dirty_registry_survives_a_poll_with_newer_server_state() -> Result<()> {
    let server = common::spawn_server(BackendState::default())?;
    let client = RemoteClient::new(&server.base_url)?;
    let (tx, rx) = mpsc::channel();
    let seq = Arc::new(AtomicU64::new(0));
    let poller = start_poller(client, tx, seq, Duration::from_millis(30));

    let mut gate = StaleGate::default();
    let mut binding: EditableBinding<AudioRegistry> =
        EditableBinding::new(AudioRegistry::default());

    // Bootstrap: clean binding takes the server document.
    let config = wait_for_config(&rx, &mut gate, Duration::from_secs(5)).expect("bootstrap");
    binding.reconcile(config.audio_registry);
    assert!(!binding.dirty());

    // Local edit: one added, unsaved archetype row.
    binding.edit(|reg| {
        reg.archetypes.push(Archetype {
            id: "archetype_local".to_string(),
            label: "Unsaved Row".to_string(),
            voice_id: String::new(),
        });
    });

    // The server registry changes out from under us.
    server.state.lock().unwrap().audio_registry = json!({
        "dmName": "Other Session",
        "dmVoice": "v2",
        "archetypes": [{ "id": "archetype_remote", "label": "Server Row", "voice_id": "" }],
        "soundscapes": [],
    });

    // Let at least one more poll tick deliver the new server document.
    let config = wait_for_config(&rx, &mut gate, Duration::from_secs(5)).expect("next tick");
    assert_eq!(config.audio_registry.dm_name, "Other Session");
    binding.reconcile(config.audio_registry);

    // The unsaved row is still present afterwards.
    assert!(binding.dirty());
    assert_eq!(binding.local().archetypes.len(), 1);
    assert_eq!(binding.local().archetypes[0].label, "Unsaved Row");

    poller.stop();
    poller.stop(); // idempotent
    Ok(())
}

#[test]
fn save_then_reconcile_follows_the_server_again() -> Result<()> {
    let server = common::spawn_server(BackendState::default())?;
    let client = RemoteClient::new(&server.base_url)?;

    let mut binding: EditableBinding<AudioRegistry> =
        EditableBinding::new(AudioRegistry::default());
    binding.reconcile(client.fetch_config()?.audio_registry);

    binding.edit(|reg| {
        reg.archetypes.push(Archetype {
            id: "archetype_x".to_string(),
            label: "The Villain".to_string(),
            voice_id: "v1".to_string(),
        });
    });

    binding.save(|reg| client.save_audio_registry(reg).map(|_| ()))?;
    assert!(!binding.dirty());

    // Clean again: the next fetched document is applied.
    let fetched = client.fetch_config()?.audio_registry;
    assert_eq!(fetched.archetypes.len(), 1);
    binding.reconcile(fetched.clone());
    assert_eq!(binding.local(), &fetched);
    Ok(())
}

#[test]
fn failed_poll_leaves_state_and_degrades_health_slowly() -> Result<()> {
    let server = common::spawn_server(BackendState::default())?;
    let client = RemoteClient::new(&server.base_url)?;

    let mut health = ConnHealth::default();
    let mut last_config: Option<SystemConfig> = None;

    match client.fetch_config() {
        Ok(c) => {
            health.on_success();
            last_config = Some(c);
        }
        Err(_) => health.on_failure(),
    }
    assert_eq!(health.state(), ConnState::Online);

    // Kill the backend; fetches now fail but previous state stays intact.
    drop(server);

    for _ in 0..2 {
        if client.fetch_config().is_err() {
            health.on_failure();
        }
    }
    assert_eq!(health.state(), ConnState::Online, "no flapping on a miss");
    assert!(last_config.is_some(), "failure never clears state");

    if client.fetch_config().is_err() {
        health.on_failure();
    }
    assert_eq!(health.state(), ConnState::Offline, "sustained failure surfaces");
    assert_eq!(
        last_config.unwrap().active_campaign,
        "the_collision_stone"
    );
    Ok(())
}

#[test]
fn bootstrap_failure_reports_offline_immediately() -> Result<()> {
    // Nothing listens here.
    let client = RemoteClient::new("http://127.0.0.1:9")?;
    let mut health = ConnHealth::default();
    assert_eq!(health.state(), ConnState::Connecting);

    if client.fetch_config().is_err() {
        health.on_failure();
    }
    assert_eq!(health.state(), ConnState::Offline);
    Ok(())
}

#[test]
fn out_of_order_completion_cannot_overwrite_newer_state() {
    // Fetch A issued (seq 1), then fetch B issued (seq 2); B completes
    // first, A arrives late.
    let mut gate = StaleGate::default();
    let mut applied: Vec<&str> = Vec::new();

    if gate.admit(PollStream::Config, 2) {
        applied.push("B");
    }
    if gate.admit(PollStream::Config, 1) {
        applied.push("A");
    }

    assert_eq!(applied, vec!["B"], "stale result A must be discarded");
}
