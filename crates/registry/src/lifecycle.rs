//! One-shot lifecycle latches.
//!
//! The registry carries two of these: one flipped when every extension has
//! finished loading (content frozen), one flipped when recipes are finalized.
//! They are independent on purpose; the host decides when each trips.

use std::sync::atomic::{AtomicBool, Ordering};

/// A boolean that can go from open to tripped exactly once.
#[derive(Debug, Default)]
pub struct Latch {
    tripped: AtomicBool,
}

impl Latch {
    pub const fn new() -> Self {
        Self {
            tripped: AtomicBool::new(false),
        }
    }

    /// Trip the latch. Returns `true` only for the call that actually tripped it.
    pub fn trip(&self) -> bool {
        self.tripped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }
}

/// Snapshot of both latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct LifecycleState {
    pub all_mods_loaded: bool,
    pub recipes_frozen: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_trips_once() {
        let latch = Latch::new();
        assert!(!latch.is_tripped());
        assert!(latch.trip());
        assert!(latch.is_tripped());
        assert!(!latch.trip());
        assert!(latch.is_tripped());
    }
}
