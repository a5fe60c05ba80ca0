//! Navigation state machine
//!
//! [`resolve`] is pure: given the slide set, where the slider currently is,
//! and a request, it returns the slide to expose plus the scroll moves that
//! get there. Executing the moves and updating presentation is the caller's
//! job.
//!
//! # Infinite wrap
//!
//! Stepping past a boundary never exposes a clone. The slider first jumps
//! (instantly) to the clone that mirrors the current slide on the opposite
//! side, then animates one hop to the real target:
//!
//! ```text
//!   [C'] A  B  C  [A']        at C, next
//!    ▲             │
//!    └── instant ──┘          land on C' (looks identical to C)
//!    └─ smooth ─► A           visible hop C → A
//! ```

use smallvec::SmallVec;

use coral_core::config::SliderConfig;
use coral_core::ids::{SlideId, SlideRef};

use crate::slides::SlideSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

/// A navigation request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavRequest {
    /// Step by one group
    Step(Direction),
    /// Go to the original carrying this id
    TargetId(SlideId),
    /// Go to the original at this position
    TargetPosition(usize),
}

impl NavRequest {
    pub fn next() -> Self {
        NavRequest::Step(Direction::Next)
    }

    pub fn previous() -> Self {
        NavRequest::Step(Direction::Previous)
    }
}

/// Where the slider currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    /// Set index of the current slide (may be a clone)
    pub index: usize,
    /// The track cannot scroll any further forward
    pub at_track_end: bool,
}

impl Cursor {
    pub fn at(index: usize) -> Self {
        Self {
            index,
            at_track_end: false,
        }
    }
}

/// One scroll the caller must perform, by set index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollMove {
    /// Jump without animation
    Instant(usize),
    /// Animated scroll
    Smooth(usize),
}

/// The slide a resolution exposes, with its step neighbours
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSlide {
    pub id: SlideId,
    /// Set index (always an original)
    pub index: usize,
    pub position: usize,
    /// Set index one group back; a leading clone at the start in infinite mode
    pub previous: Option<usize>,
    /// Set index one group ahead; a trailing clone at the end in infinite mode
    pub next: Option<usize>,
}

impl ResolvedSlide {
    pub fn slide_ref(&self) -> SlideRef {
        SlideRef::new(self.id.clone(), self.position)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub resolved: ResolvedSlide,
    pub moves: SmallVec<[ScrollMove; 2]>,
    /// The exposed slide differs from the one the cursor was on
    pub changed: bool,
}

/// Resolve a request against the current slide set
///
/// Returns `None` when there is nothing to navigate: no originals, an
/// unresolvable clone under the cursor, or an unknown explicit target.
pub fn resolve(
    set: &SlideSet,
    cursor: Cursor,
    request: &NavRequest,
    config: &SliderConfig,
) -> Option<Resolution> {
    let last = set.last_position()?;
    let cursor_index = cursor.index.min(set.len().saturating_sub(1));

    let mut moves = SmallVec::new();

    // Never start from a clone: settle onto its original first
    let Some(current) = set.original_index(cursor_index) else {
        tracing::warn!(index = cursor_index, "navigation: clone without original");
        return None;
    };
    if current != cursor_index {
        moves.push(ScrollMove::Instant(current));
    }
    let position = set.get(current)?.position?;
    let group = config.slides_per_group.max(1);

    let target = match request {
        NavRequest::Step(Direction::Next) => {
            if !config.infinite && cursor.at_track_end {
                current
            } else if position + group <= last {
                set.index_of_position(position + group)?
            } else if position < last {
                set.index_of_position(last)?
            } else if config.infinite {
                if let Some(mirror) = set.leading_mirror(position) {
                    moves.push(ScrollMove::Instant(mirror));
                }
                set.index_of_position(0)?
            } else {
                current
            }
        }
        NavRequest::Step(Direction::Previous) => {
            if position >= group {
                set.index_of_position(position - group)?
            } else if position > 0 {
                set.index_of_position(0)?
            } else if config.infinite {
                if let Some(mirror) = set.trailing_mirror(0) {
                    moves.push(ScrollMove::Instant(mirror));
                }
                set.index_of_position(last_group_start(last, group))?
            } else {
                current
            }
        }
        NavRequest::TargetId(id) => set.index_of_id(id)?,
        NavRequest::TargetPosition(target) => set.index_of_position(*target)?,
    };

    let explicit = !matches!(request, NavRequest::Step(_));
    if explicit || target != current {
        moves.push(ScrollMove::Smooth(target));
    }

    let resolved = describe(set, target, config)?;
    tracing::trace!(
        from = position,
        to = resolved.position,
        moves = moves.len(),
        "navigation: resolved"
    );
    Some(Resolution {
        changed: target != current,
        resolved,
        moves,
    })
}

/// Describe the original at `index` with its group-step neighbours
pub fn describe(set: &SlideSet, index: usize, config: &SliderConfig) -> Option<ResolvedSlide> {
    let original = set.original_index(index)?;
    let entry = set.get(original)?;
    let position = entry.position?;
    let last = set.last_position()?;
    let group = config.slides_per_group.max(1);

    let previous = if position == 0 {
        if config.infinite {
            set.leading_mirror(last)
        } else {
            None
        }
    } else {
        set.index_of_position(position.saturating_sub(group))
    };

    let next = if position == last {
        if config.infinite {
            set.trailing_mirror(0)
        } else {
            None
        }
    } else {
        set.index_of_position((position + group).min(last))
    };

    Some(ResolvedSlide {
        id: entry.id.clone(),
        index: original,
        position,
        previous,
        next,
    })
}

/// Position of the first slide of the last group
pub fn last_group_start(last: usize, group: usize) -> usize {
    (last / group.max(1)) * group.max(1)
}
