//! Identifiers shared between slider instances
//!
//! Slides are addressed by stable string identifiers rather than by index:
//! inserting or removing clones shifts every index on the track, but never
//! changes a slide's id.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Stable identifier of a slide element (`data-slide-id`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(String);

impl SlideId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlideId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SlideId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Per-instance tag (`data-coral-scroll-id`)
///
/// Used to filter broadcasts addressed to one instance and to recognise a
/// slider's own announcements when they come back over the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocate a fresh id, unique for the lifetime of the process
    pub fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a slide carried across instances
///
/// Receivers resolve by `id` first. A cooperating slider (a thumbs strip)
/// usually has different ids for the same content, so `position`, the
/// ordinal among non-hidden non-clone slides, is the fallback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRef {
    pub id: SlideId,
    pub position: usize,
}

impl SlideRef {
    pub fn new(id: impl Into<SlideId>, position: usize) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}
