//! Boundary clones for infinite mode
//!
//! The originals are split into groups of `slides_per_group`. The last
//! group is duplicated in front of the first slide and the first group after
//! the last, so the track can keep scrolling past either end:
//!
//! ```text
//!  [D' E'] A B │ C D │ E  [A' B']      5 slides, groups of 2
//!   └ last group       first group ┘
//! ```
//!
//! The check for existing clones is structural (no cached flag), so calling
//! [`ensure_clones`] again after the markup changed underneath always ends
//! in exactly one clone group per boundary.

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::dom::{classes, data, DomSurface, ElementKey, InsertAt, Part};

/// Exclusive upper bound of the random part of a clone id
const CLONE_ID_SPACE: u64 = 10_000_000_000;

/// What `ensure_clones` did to the track
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloneOutcome {
    /// Clones already matched the slide set (or none were needed)
    Unchanged,
    /// Old clones removed and a fresh pair of groups inserted
    Regenerated { leading: usize, trailing: usize },
    /// Finite mode: existing clones were torn down
    Removed(usize),
}

/// Bring the track's clones in line with the slide set and mode
pub fn ensure_clones<D: DomSurface + ?Sized>(
    dom: &mut D,
    slides_per_group: usize,
    infinite: bool,
) -> CloneOutcome {
    let keys = dom.slides();
    let clones: Vec<ElementKey> = keys.iter().copied().filter(|k| dom.is_clone(*k)).collect();
    let originals: Vec<ElementKey> = keys
        .iter()
        .copied()
        .filter(|k| !dom.is_clone(*k) && !dom.is_hidden(*k))
        .collect();

    if !infinite || originals.is_empty() {
        remove_all(dom, &clones);
        dom.set_data(Part::Track, data::CLONES_ACTIVE, None);
        return if clones.is_empty() {
            CloneOutcome::Unchanged
        } else {
            tracing::debug!(removed = clones.len(), "clones: torn down");
            CloneOutcome::Removed(clones.len())
        };
    }

    let count = originals.len();
    let group = slides_per_group.clamp(1, count);
    let first_group = &originals[..group];
    let last_group = &originals[((count - 1) / group) * group..];

    if is_materialized(dom, &keys, first_group, last_group) {
        return CloneOutcome::Unchanged;
    }

    remove_all(dom, &clones);

    let mut taken: FxHashSet<String> = dom
        .slides()
        .into_iter()
        .flat_map(|key| {
            [
                dom.data(Part::Slide(key), data::SLIDE_ID),
                dom.data(Part::Slide(key), data::CLONE_ID),
            ]
        })
        .flatten()
        .collect();
    let mut rng = rand::thread_rng();

    let anchor = originals[0];
    let mut leading = 0;
    for source in last_group {
        if let Some(clone) = dom.insert_clone(*source, InsertAt::Before(anchor)) {
            mark_clone(dom, clone, &mut taken, &mut rng);
            leading += 1;
        }
    }

    let mut trailing = 0;
    for source in first_group {
        if let Some(clone) = dom.insert_clone(*source, InsertAt::End) {
            mark_clone(dom, clone, &mut taken, &mut rng);
            trailing += 1;
        }
    }

    dom.set_data(Part::Track, data::CLONES_ACTIVE, Some("true"));
    tracing::debug!(
        removed = clones.len(),
        leading,
        trailing,
        group,
        "clones: regenerated"
    );
    CloneOutcome::Regenerated { leading, trailing }
}

fn remove_all<D: DomSurface + ?Sized>(dom: &mut D, clones: &[ElementKey]) {
    for key in clones {
        dom.remove_slide(*key);
    }
}

fn mark_clone<D: DomSurface + ?Sized, R: Rng>(
    dom: &mut D,
    clone: ElementKey,
    taken: &mut FxHashSet<String>,
    rng: &mut R,
) {
    let id = loop {
        let candidate = format!("clone-{}", rng.gen_range(0..CLONE_ID_SPACE));
        if taken.insert(candidate.clone()) {
            break candidate;
        }
    };
    let part = Part::Slide(clone);
    dom.set_data(part, data::CLONE_ID, Some(&id));
    dom.set_class(part, classes::CLONE, true);
    dom.set_class(part, classes::ACTIVE, false);
    dom.set_class(part, classes::HIDDEN, false);
}

/// Whether the visible sequence is exactly `last' ++ originals ++ first'`
fn is_materialized<D: DomSurface + ?Sized>(
    dom: &D,
    keys: &[ElementKey],
    first_group: &[ElementKey],
    last_group: &[ElementKey],
) -> bool {
    let slide_id = |key: ElementKey| dom.data(Part::Slide(key), data::SLIDE_ID);

    let visible: Vec<ElementKey> = keys.iter().copied().filter(|k| !dom.is_hidden(*k)).collect();
    let Some(first_original) = visible.iter().position(|k| !dom.is_clone(*k)) else {
        return false;
    };
    let Some(last_original) = visible.iter().rposition(|k| !dom.is_clone(*k)) else {
        return false;
    };

    let leading = &visible[..first_original];
    let middle = &visible[first_original..=last_original];
    let trailing = &visible[last_original + 1..];

    // Hidden clones would be invisible duplicates
    let hidden_clone = keys.iter().any(|k| dom.is_clone(*k) && dom.is_hidden(*k));
    if hidden_clone || middle.iter().any(|k| dom.is_clone(*k)) {
        return false;
    }

    let mirrors = |clones: &[ElementKey], sources: &[ElementKey]| {
        clones.len() == sources.len()
            && clones.iter().zip(sources).all(|(clone, source)| {
                let clone_id = dom.data(Part::Slide(*clone), data::CLONE_ID);
                clone_id.is_some_and(|id| !id.is_empty())
                    && slide_id(*clone).is_some()
                    && slide_id(*clone) == slide_id(*source)
            })
    };

    mirrors(leading, last_group)
        && mirrors(trailing, first_group)
        && dom.data(Part::Track, data::CLONES_ACTIVE).as_deref() == Some("true")
}
