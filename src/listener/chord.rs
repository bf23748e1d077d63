//! Chord detection over raw key press/release events.
//!
//! The tracker holds only the chord keys that are currently down. A press
//! reports "fire" whenever the full chord is held afterwards, so tapping one
//! chord key while the others stay held fires again. That re-trigger is the
//! intended behavior; the listener's single-slot dispatch coalesces fires
//! that land while a pipeline run is in flight.

use std::collections::HashSet;

/// Logical chord keys, with left/right modifier variants already folded
/// together by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordKey {
    Control,
    Shift,
    KeyG,
}

/// The fixed trigger chord: Ctrl + Shift + G.
pub const CHORD: [ChordKey; 3] = [ChordKey::Control, ChordKey::Shift, ChordKey::KeyG];

#[derive(Debug, Default)]
pub struct ChordTracker {
    held: HashSet<ChordKey>,
}

impl ChordTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns true when the full chord is held after this
    /// press, i.e. the pipeline should fire.
    pub fn press(&mut self, key: ChordKey) -> bool {
        self.held.insert(key);
        CHORD.iter().all(|k| self.held.contains(k))
    }

    /// Record a release. A release of a key that was never tracked is a
    /// no-op.
    pub fn release(&mut self, key: ChordKey) {
        self.held.remove(&key);
    }
}
