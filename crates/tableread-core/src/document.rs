//! The shared screenplay and its change-detection policy

use std::sync::Arc;

/// Scene every room opens on until the first edit lands.
pub const SEED_SCRIPT: &str = "\
INT. COFFEE SHOP - NIGHT

Rain lashes against the window. JANE (30s), nursing a cold coffee, stares blankly. LEO (30s), energetic, slides into the booth opposite her.

LEO
You look like you've seen a ghost.

JANE
Maybe I have. The ghost of my career.

LEO
(Smiling)
That's dramatic. It's just one bad review.";

/// Where an accepted edit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOrigin {
    /// A connected editor pushed a full replacement through the room.
    Editor,
    /// The simulated collaborator appended its periodic line.
    SimulatedPeer,
}

/// One accepted mutation, as delivered to every subscriber.
#[derive(Debug, Clone)]
pub struct ScriptUpdate {
    /// Monotonic change counter; two distinct edits never share a revision,
    /// even if they happen to produce identical text.
    pub revision: u64,
    /// The full script after the edit.
    pub content: Arc<str>,
    pub origin: UpdateOrigin,
}

/// The single shared script.
///
/// Writes are equality-gated: replacing the content with byte-identical text
/// is not a change, does not bump the revision, and never reaches
/// subscribers. Two different edits that happen to coincide textually are
/// therefore indistinguishable from no edit at all; that trade-off is part
/// of the contract.
#[derive(Debug)]
pub struct Script {
    content: Arc<str>,
    revision: u64,
}

impl Script {
    pub fn new(seed: &str) -> Self {
        Self {
            content: Arc::from(seed),
            revision: 0,
        }
    }

    /// Current content, without side effects.
    pub fn content(&self) -> Arc<str> {
        self.content.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the entire script. Returns whether a change actually occurred;
    /// identical content leaves the script untouched.
    pub fn replace(&mut self, new_content: &str) -> bool {
        if self.content.as_ref() == new_content {
            return false;
        }
        self.content = Arc::from(new_content);
        self.revision += 1;
        true
    }

    /// Append `text` to the script. Appends always change the content, so
    /// the equality gate does not apply.
    pub fn append(&mut self, text: &str) {
        let mut next = String::with_capacity(self.content.len() + text.len());
        next.push_str(&self.content);
        next.push_str(text);
        self.content = Arc::from(next);
        self.revision += 1;
    }

    /// The current state packaged for delivery.
    pub(crate) fn snapshot(&self, origin: UpdateOrigin) -> ScriptUpdate {
        ScriptUpdate {
            revision: self.revision,
            content: self.content.clone(),
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_changes_content_and_revision() {
        let mut script = Script::new(SEED_SCRIPT);
        assert_eq!(script.revision(), 0);

        assert!(script.replace("revised text"));
        assert_eq!(script.content().as_ref(), "revised text");
        assert_eq!(script.revision(), 1);
    }

    #[test]
    fn test_identical_replace_is_not_a_change() {
        let mut script = Script::new("draft one");

        assert!(!script.replace("draft one"));
        assert_eq!(script.revision(), 0);

        assert!(script.replace("draft two"));
        assert!(!script.replace("draft two"));
        assert_eq!(script.revision(), 1);
    }

    #[test]
    fn test_append_always_counts_as_a_change() {
        let mut script = Script::new("FADE IN.");

        script.append("\n\nA line.");
        script.append("\n\nA line.");

        assert_eq!(script.revision(), 2);
        assert_eq!(script.content().as_ref(), "FADE IN.\n\nA line.\n\nA line.");
    }

    #[test]
    fn test_snapshot_carries_current_state() {
        let mut script = Script::new("start");
        script.replace("middle");

        let update = script.snapshot(UpdateOrigin::Editor);
        assert_eq!(update.revision, 1);
        assert_eq!(update.content.as_ref(), "middle");
        assert_eq!(update.origin, UpdateOrigin::Editor);
    }
}
