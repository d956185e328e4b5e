//! Subscriber registration and broadcast fan-out

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::document::ScriptUpdate;

/// Opaque registration token identifying one connected subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A live connection to the room: the registration token, the content
/// snapshot taken at connect time, and the stream of accepted edits.
pub struct Subscription {
    id: SubscriberId,
    initial: Arc<str>,
    updates: mpsc::UnboundedReceiver<ScriptUpdate>,
}

impl Subscription {
    pub(crate) fn new(
        id: SubscriberId,
        initial: Arc<str>,
        updates: mpsc::UnboundedReceiver<ScriptUpdate>,
    ) -> Self {
        Self { id, initial, updates }
    }

    /// The token to pass to `ScriptRoom::disconnect`.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// The script as it existed when this subscriber connected. Lets the
    /// caller render immediately instead of waiting for a broadcast.
    pub fn initial_content(&self) -> &str {
        &self.initial
    }

    /// Next accepted edit, in order. Returns `None` once the room itself
    /// has been dropped.
    pub async fn recv(&mut self) -> Option<ScriptUpdate> {
        self.updates.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv). Returns `None` when no
    /// edit is currently queued.
    pub fn try_recv(&mut self) -> Option<ScriptUpdate> {
        self.updates.try_recv().ok()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// The set of currently connected subscribers.
///
/// Membership is keyed by [`SubscriberId`]; adding a token twice replaces
/// the previous delivery target rather than duplicating it, and removing an
/// absent token is a no-op. The count only gates the simulated collaborator
/// and is never surfaced to room members.
#[derive(Default)]
pub(crate) struct Registry {
    subscribers: HashMap<SubscriberId, mpsc::UnboundedSender<ScriptUpdate>>,
}

impl Registry {
    pub(crate) fn add(&mut self, id: SubscriberId, sender: mpsc::UnboundedSender<ScriptUpdate>) {
        self.subscribers.insert(id, sender);
    }

    pub(crate) fn remove(&mut self, id: SubscriberId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `update` to every subscriber present right now, exactly once
    /// each. A subscriber whose receiver has been dropped is skipped
    /// silently; the stale entry stays registered until it is disconnected.
    pub(crate) fn broadcast(&self, update: &ScriptUpdate) {
        for (id, sender) in &self.subscribers {
            if sender.send(update.clone()).is_err() {
                trace!(subscriber = %id, "skipping subscriber with dropped receiver");
            }
        }
        debug!(
            revision = update.revision,
            subscribers = self.subscribers.len(),
            "update broadcast"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ScriptUpdate, UpdateOrigin};

    fn update(revision: u64) -> ScriptUpdate {
        ScriptUpdate {
            revision,
            content: Arc::from("content"),
            origin: UpdateOrigin::Editor,
        }
    }

    #[test]
    fn test_add_remove_membership() {
        let mut registry = Registry::default();
        assert!(registry.is_empty());

        let id = SubscriberId::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.add(id, tx);
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(id));
        assert!(registry.is_empty());

        // Removing an absent token is a harmless no-op.
        assert!(!registry.remove(id));
    }

    #[test]
    fn test_readding_a_token_does_not_duplicate_delivery() {
        let mut registry = Registry::default();
        let id = SubscriberId::new();

        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.add(id, tx_a);
        registry.add(id, tx_b);
        assert_eq!(registry.len(), 1);

        registry.broadcast(&update(1));
        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_reaches_every_subscriber_once() {
        let mut registry = Registry::default();
        let mut receivers = Vec::new();
        for _ in 0..3 {
            let (tx, rx) = mpsc::unbounded_channel();
            registry.add(SubscriberId::new(), tx);
            receivers.push(rx);
        }

        registry.broadcast(&update(7));

        for rx in &mut receivers {
            let delivered = rx.try_recv().unwrap();
            assert_eq!(delivered.revision, 7);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn test_dropped_receiver_is_skipped_silently() {
        let mut registry = Registry::default();

        let gone = SubscriberId::new();
        let (tx_gone, rx_gone) = mpsc::unbounded_channel();
        registry.add(gone, tx_gone);
        drop(rx_gone);

        let live = SubscriberId::new();
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        registry.add(live, tx_live);

        registry.broadcast(&update(1));

        // The dead entry neither panics nor disturbs live delivery, and it
        // stays registered until disconnected.
        assert_eq!(registry.len(), 2);
        assert_eq!(rx_live.try_recv().unwrap().revision, 1);
    }
}
