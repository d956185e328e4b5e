//! The synchronization facade subscribers talk to

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::document::{Script, UpdateOrigin, SEED_SCRIPT};
use crate::registry::{Registry, SubscriberId, Subscription};
use crate::simulator::{self, DEFAULT_PEER_INTERVAL, PEER_LINE};

/// Room construction knobs. Defaults match the production service: the
/// coffee-shop seed scene and a collaborator line every 15 seconds.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Script content the room opens on.
    pub seed_content: String,
    /// Period of the simulated collaborator's edits.
    pub peer_interval: Duration,
    /// Text the simulated collaborator appends on each tick.
    pub peer_line: String,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            seed_content: SEED_SCRIPT.to_string(),
            peer_interval: DEFAULT_PEER_INTERVAL,
            peer_line: PEER_LINE.to_string(),
        }
    }
}

/// Diagnostic snapshot of a room. Occupancy itself stays internal; it only
/// gates the simulated collaborator and is never surfaced as a presence
/// count.
#[derive(Debug, Clone)]
pub struct RoomStats {
    pub revision: u64,
    pub simulator_active: bool,
}

pub(crate) struct RoomState {
    pub(crate) script: Script,
    pub(crate) registry: Registry,
    /// Present iff the registry is non-empty.
    pub(crate) simulator: Option<JoinHandle<()>>,
}

pub(crate) struct Shared {
    pub(crate) config: RoomConfig,
    pub(crate) state: Mutex<RoomState>,
}

/// The shared writers-room: one mutable script kept consistent across any
/// number of concurrent subscribers.
///
/// A single lock owns the script, the registry, and the simulator handle,
/// so `connect`, `disconnect`, `update_script`, and each simulator tick run
/// as non-interleaving steps. None of the operations fail; a stale
/// [`SubscriberId`] is a harmless no-op everywhere it can be passed.
///
/// Cloning the room hands out another handle to the same shared state.
#[derive(Clone)]
pub struct ScriptRoom {
    shared: Arc<Shared>,
}

impl ScriptRoom {
    pub fn new() -> Self {
        Self::with_config(RoomConfig::default())
    }

    pub fn with_config(config: RoomConfig) -> Self {
        let state = RoomState {
            script: Script::new(&config.seed_content),
            registry: Registry::default(),
            simulator: None,
        };

        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(state),
            }),
        }
    }

    /// Join the room.
    ///
    /// Registers the caller, wakes the simulated collaborator if the room
    /// was empty, and returns the current script synchronously so the caller
    /// can render without waiting for a broadcast.
    ///
    /// Must be called within a Tokio runtime: the first subscriber spawns
    /// the collaborator task.
    pub fn connect(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = SubscriberId::new();

        let mut state = self.shared.state.lock();
        state.registry.add(id, sender);
        if state.simulator.is_none() {
            state.simulator = Some(simulator::spawn(Arc::downgrade(&self.shared)));
            debug!("room occupied, simulated collaborator started");
        }
        let initial = state.script.content();
        let subscribers = state.registry.len();
        drop(state);

        info!(subscriber = %id, subscribers, "subscriber connected");
        Subscription::new(id, initial, receiver)
    }

    /// Leave the room. Unknown or already-removed tokens are a harmless
    /// no-op. The simulated collaborator stops as soon as the room is empty,
    /// however it became empty.
    pub fn disconnect(&self, id: SubscriberId) {
        let mut state = self.shared.state.lock();
        let removed = state.registry.remove(id);
        if state.registry.is_empty() {
            if let Some(task) = state.simulator.take() {
                task.abort();
                debug!("room empty, simulated collaborator stopped");
            }
        }
        let subscribers = state.registry.len();
        drop(state);

        if removed {
            info!(subscriber = %id, subscribers, "subscriber disconnected");
        }
    }

    /// Push a full replacement of the script.
    ///
    /// Content identical to the current script is dropped without touching
    /// the store or any subscriber; callers rely on that to avoid feedback
    /// loops when their own edit is echoed back to them. An accepted change
    /// is delivered to every subscriber, the originator included, before
    /// this call returns.
    pub fn update_script(&self, new_content: &str) {
        let mut state = self.shared.state.lock();
        if !state.script.replace(new_content) {
            return;
        }

        let update = state.script.snapshot(UpdateOrigin::Editor);
        debug!(revision = update.revision, "script updated");
        state.registry.broadcast(&update);
    }

    pub fn stats(&self) -> RoomStats {
        let state = self.shared.state.lock();
        RoomStats {
            revision: state.script.revision(),
            simulator_active: state.simulator.is_some(),
        }
    }
}

impl Default for ScriptRoom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_returns_seed_without_broadcast() {
        let room = ScriptRoom::new();

        let mut sub = room.connect();
        assert_eq!(sub.initial_content(), SEED_SCRIPT);
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_connect_snapshots_latest_content() {
        let room = ScriptRoom::new();

        let _first = room.connect();
        room.update_script("revised text");

        let late = room.connect();
        assert_eq!(late.initial_content(), "revised text");
    }

    #[tokio::test]
    async fn test_update_reaches_every_subscriber_exactly_once() {
        let room = ScriptRoom::new();
        let mut subs = vec![room.connect(), room.connect(), room.connect()];

        room.update_script("revised text");

        for sub in &mut subs {
            let update = sub.try_recv().expect("one delivery per subscriber");
            assert_eq!(update.content.as_ref(), "revised text");
            assert_eq!(update.revision, 1);
            assert_eq!(update.origin, UpdateOrigin::Editor);
            assert!(sub.try_recv().is_none());
        }
    }

    #[tokio::test]
    async fn test_originator_receives_its_own_echo() {
        let room = ScriptRoom::new();
        let mut sub = room.connect();

        room.update_script("my own edit");

        // No echo suppression: the writing subscriber hears itself too.
        assert_eq!(sub.try_recv().unwrap().content.as_ref(), "my own edit");
    }

    #[tokio::test]
    async fn test_identical_update_is_dropped() {
        let room = ScriptRoom::new();
        let mut sub = room.connect();

        room.update_script("revised text");
        room.update_script("revised text");

        assert!(sub.try_recv().is_some());
        assert!(sub.try_recv().is_none());
        assert_eq!(room.stats().revision, 1);
    }

    #[tokio::test]
    async fn test_disconnect_of_unknown_token_is_harmless() {
        let room = ScriptRoom::new();
        let mut sub = room.connect();

        room.disconnect(SubscriberId::new());

        room.update_script("still flowing");
        assert!(sub.try_recv().is_some());
    }

    #[tokio::test]
    async fn test_simulator_tracks_occupancy_edges() {
        let room = ScriptRoom::new();
        assert!(!room.stats().simulator_active);

        let a = room.connect();
        assert!(room.stats().simulator_active);

        let b = room.connect();
        assert!(room.stats().simulator_active);

        room.disconnect(a.id());
        assert!(room.stats().simulator_active);

        room.disconnect(b.id());
        assert!(!room.stats().simulator_active);

        // Reoccupying restarts it.
        let c = room.connect();
        assert!(room.stats().simulator_active);
        room.disconnect(c.id());
        assert!(!room.stats().simulator_active);
    }

    #[tokio::test]
    async fn test_remaining_subscriber_keeps_receiving() {
        let room = ScriptRoom::new();
        let a = room.connect();
        let mut b = room.connect();

        room.disconnect(a.id());
        assert!(room.stats().simulator_active);

        room.update_script("second draft");
        assert_eq!(b.try_recv().unwrap().content.as_ref(), "second draft");
    }

    #[tokio::test(start_paused = true)]
    async fn test_collaborator_appends_after_one_period() {
        let room = ScriptRoom::new();
        let mut sub = room.connect();

        let update = sub.recv().await.expect("collaborator edit");
        assert_eq!(update.origin, UpdateOrigin::SimulatedPeer);
        assert_eq!(update.revision, 1);
        assert!(update.content.starts_with(SEED_SCRIPT));
        assert!(update.content.ends_with(PEER_LINE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_subscriber_does_not_double_the_edit_rate() {
        let room = ScriptRoom::new();
        let mut a = room.connect();
        let _b = room.connect();

        let first = a.recv().await.unwrap();
        assert_eq!(first.revision, 1);

        // A second concurrent timer would have landed another edit by now.
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(a.try_recv().is_none());

        let second = a.recv().await.unwrap();
        assert_eq!(second.revision, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_room_accumulates_no_edits() {
        let room = ScriptRoom::new();

        let a = room.connect();
        room.disconnect(a.id());

        // Nothing ticks while the room is empty.
        tokio::time::advance(Duration::from_secs(120)).await;

        let late = room.connect();
        assert_eq!(late.initial_content(), SEED_SCRIPT);
        assert_eq!(room.stats().revision, 0);
    }
}
