//! Geometry reader
//!
//! Projects the laid out slides onto the scroll axis and measures each one
//! against the track's snap origin:
//!
//! ```text
//!   track.start + padding_start = origin
//!   │
//!   ▼
//!   ├──────── inner extent ────────┤
//!   │ start   │   center   │   end │
//! ```
//!
//! The offset of a slide is the distance its snap point must travel to reach
//! the snap origin for the configured alignment. The active slide is the one
//! with the smallest absolute offset; ties go to the earlier slide.

use coral_core::config::SliderConfig;
use coral_core::layout::SnapAlignment;

use crate::dom::DomSurface;
use crate::slides::SlideSet;

/// Normalised view of the track at one instant
#[derive(Clone, Debug, PartialEq)]
pub struct SliderSnapshot {
    /// Signed distance of each slide's snap point from the snap origin
    pub offsets: Vec<f32>,
    /// Slide size plus the following gap (the last slide has no gap)
    pub extents: Vec<f32>,
    pub sizes: Vec<f32>,
    /// Set index of the slide closest to the snap origin
    pub active_index: usize,
    /// The track is scrolled to its end (within tolerance)
    pub is_last_slide: bool,
    pub is_second_last_slide: bool,
    pub scroll_offset: f32,
    /// Track extent minus its paddings
    pub inner_extent: f32,
}

impl SliderSnapshot {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Scroll offset that brings slide `index` onto the snap origin
    pub fn scroll_target(&self, index: usize) -> Option<f32> {
        let offset = self.offsets.get(index)?;
        Some((self.scroll_offset + offset).max(0.0))
    }
}

/// Measure the track
///
/// `None` when there are no visible slides or the track cannot be measured.
pub fn read_state<D: DomSurface + ?Sized>(
    dom: &D,
    set: &SlideSet,
    config: &SliderConfig,
) -> Option<SliderSnapshot> {
    if set.is_empty() {
        return None;
    }
    let axis = config.axis;
    let track = dom.track_layout(axis)?;

    let track_start = axis.start(&track.rect);
    let track_extent = axis.extent(&track.rect);
    let origin = track_start + track.padding_start;
    let inner_extent = (track_extent - track.padding_start - track.padding_end).max(0.0);
    let alignment = config.snap_alignment.unwrap_or(SnapAlignment::Start);

    let count = set.len();
    let mut offsets = Vec::with_capacity(count);
    let mut sizes = Vec::with_capacity(count);
    let mut extents = Vec::with_capacity(count);
    let mut last_end = track_start;

    for (index, entry) in set.entries().iter().enumerate() {
        let Some(rect) = dom.slide_rect(entry.key) else {
            tracing::trace!(index, "geometry: slide without layout");
            offsets.push(f32::INFINITY);
            sizes.push(0.0);
            extents.push(0.0);
            continue;
        };
        let start = axis.start(&rect);
        let size = axis.extent(&rect);
        let end = start + size;

        let offset = match alignment {
            SnapAlignment::Start => start - origin,
            SnapAlignment::Center => (start + size / 2.0) - (origin + inner_extent / 2.0),
            SnapAlignment::End => end - (origin + inner_extent),
        };

        offsets.push(offset);
        sizes.push(size);
        extents.push(if index + 1 < count { size + track.gap } else { size });
        last_end = end;
    }

    let active_index = closest_to_origin(&offsets);
    let trailing = last_end + track.padding_end - track_start;
    let is_last_slide =
        trailing <= track_extent + config.last_slide_tolerance || active_index + 1 == count;
    let is_second_last_slide = count >= 2 && active_index + 2 == count;

    let snapshot = SliderSnapshot {
        offsets,
        extents,
        sizes,
        active_index,
        is_last_slide,
        is_second_last_slide,
        scroll_offset: dom.scroll_offset(axis),
        inner_extent,
    };

    if config.dev_mode {
        tracing::info!(target: "coral_scroll::dev", ?snapshot, "slider state");
    }
    Some(snapshot)
}

/// Index of the minimum absolute offset; first wins on ties
fn closest_to_origin(offsets: &[f32]) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (index, offset) in offsets.iter().enumerate() {
        let distance = offset.abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}
