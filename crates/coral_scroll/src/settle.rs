//! Scroll settle
//!
//! After the track stops scrolling the active slide is re-derived from
//! geometry. Landing on a clone means the user dragged past a boundary; the
//! slider then jumps to the original without a visible move.

use std::time::{Duration, Instant};

use coral_core::ids::SlideId;
use coral_core::timer::Debouncer;

use crate::geometry::SliderSnapshot;
use crate::slides::SlideSet;

/// Coalesce scroll-end notifications to the next tick
pub const SETTLE_WINDOW: Duration = Duration::ZERO;

/// What the settled geometry asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Active slide is the one already known
    Unchanged,
    /// Active slide is a clone: jump to `original`, then treat it as settled
    Redirect { clone: usize, original: usize },
    /// A different original is now active
    Changed(usize),
}

/// Compare the settled geometry with the last known active slide
pub fn evaluate(
    set: &SlideSet,
    snapshot: &SliderSnapshot,
    last_known: Option<&SlideId>,
) -> SettleOutcome {
    let active = snapshot.active_index;
    let Some(entry) = set.get(active) else {
        return SettleOutcome::Unchanged;
    };

    if entry.is_clone() {
        return match set.original_index(active) {
            Some(original) => SettleOutcome::Redirect {
                clone: active,
                original,
            },
            None => {
                tracing::warn!(clone = %entry.id, "settle: clone without original");
                SettleOutcome::Unchanged
            }
        };
    }

    if last_known == Some(&entry.id) {
        SettleOutcome::Unchanged
    } else {
        SettleOutcome::Changed(active)
    }
}

/// Debounced scroll-end trigger
#[derive(Debug)]
pub struct ScrollSettle {
    pending: Debouncer<()>,
}

impl Default for ScrollSettle {
    fn default() -> Self {
        Self {
            pending: Debouncer::new(SETTLE_WINDOW),
        }
    }
}

impl ScrollSettle {
    pub fn notify(&mut self, now: Instant) {
        self.pending.call((), now);
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        self.pending.poll(now).is_some()
    }

    pub fn cancel(&mut self) {
        self.pending.cancel();
    }
}
