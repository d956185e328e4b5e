//! The simulated collaborator
//!
//! A single timer task that emulates a second writer: while the room has at
//! least one subscriber it appends a continuation line on a fixed period and
//! broadcasts the result. The task is started on the 0 -> 1 occupancy edge
//! and aborted on the 1 -> 0 edge.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::document::UpdateOrigin;
use crate::room::Shared;

/// How often the simulated collaborator contributes a line.
pub const DEFAULT_PEER_INTERVAL: Duration = Duration::from_secs(15);

/// The line appended on every tick.
pub const PEER_LINE: &str = "\n\nLEO (CONT'D)\n(A line added in real-time by a collaborator.)";

/// Spawn the collaborator task.
///
/// The caller stores the returned handle and aborts it when the last
/// subscriber leaves. The tick body rechecks occupancy under the room lock,
/// so a tick racing the abort can never push an edit into an empty room.
///
/// Holds only a weak reference to the room; the task exits on its own once
/// the room is dropped.
pub(crate) fn spawn(shared: Weak<Shared>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = match shared.upgrade() {
            // A zero period would panic the timer.
            Some(room) => room.config.peer_interval.max(Duration::from_millis(1)),
            None => return,
        };

        let mut ticker = tokio::time::interval(period);
        // The first tick of a tokio interval completes immediately; the
        // collaborator only speaks after a full period has passed.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let Some(room) = shared.upgrade() else {
                break;
            };

            let mut state = room.state.lock();
            if state.registry.is_empty() {
                continue;
            }

            state.script.append(&room.config.peer_line);
            let update = state.script.snapshot(UpdateOrigin::SimulatedPeer);
            debug!(revision = update.revision, "simulated collaborator appended a line");
            state.registry.broadcast(&update);
        }
    })
}
