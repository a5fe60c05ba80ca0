//! Presentation sync
//!
//! Derived visual state as a function of the resolved slide. Every class is
//! compared before it is written, so re-applying the same state touches
//! nothing.

use coral_core::config::SliderConfig;

use crate::dom::{classes, DomSurface, Part};
use crate::geometry::SliderSnapshot;
use crate::navigation::ResolvedSlide;
use crate::slides::SlideSet;

/// Apply active markers and arrow state; returns the number of class changes
pub fn apply<D: DomSurface + ?Sized>(
    dom: &mut D,
    set: &SlideSet,
    resolved: &ResolvedSlide,
    snapshot: Option<&SliderSnapshot>,
    config: &SliderConfig,
) -> usize {
    let mut changes = mark_active_slide(dom, set, resolved.index);
    changes += mark_active_dot(dom, resolved.position);

    if let Some(last) = set.last_position() {
        let at_track_end = snapshot.is_some_and(|s| {
            s.is_last_slide && set.original_index(s.active_index) == Some(resolved.index)
        });

        let previous_disabled = !config.infinite && resolved.position == 0;
        let next_disabled = !config.infinite && (resolved.position == last || at_track_end);

        changes += toggle(dom, Part::PreviousArrow, classes::DISABLED, previous_disabled);
        changes += toggle(dom, Part::NextArrow, classes::DISABLED, next_disabled);
    }

    if changes > 0 {
        tracing::trace!(position = resolved.position, changes, "presentation: applied");
    }
    changes
}

/// Put `js-active` on the original at `index` and nowhere else
///
/// Clones never carry the marker.
pub fn mark_active_slide<D: DomSurface + ?Sized>(
    dom: &mut D,
    set: &SlideSet,
    index: usize,
) -> usize {
    let active = set.original_index(index);
    set.entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| toggle(dom, Part::Slide(entry.key), classes::ACTIVE, Some(i) == active))
        .sum()
}

fn mark_active_dot<D: DomSurface + ?Sized>(dom: &mut D, position: usize) -> usize {
    (0..dom.dot_count())
        .map(|dot| toggle(dom, Part::Dot(dot), classes::ACTIVE, dot == position))
        .sum()
}

fn toggle<D: DomSurface + ?Sized>(dom: &mut D, part: Part, class: &str, enabled: bool) -> usize {
    if !dom.has_part(part) || dom.has_class(part, class) == enabled {
        return 0;
    }
    dom.set_class(part, class, enabled);
    1
}
