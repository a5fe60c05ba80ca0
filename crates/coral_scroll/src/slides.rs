//! Slide set
//!
//! A scan of the track's non-hidden slides, originals and clones, in
//! document order. Indices into a `SlideSet` are what geometry and
//! navigation work with; positions (ordinals among originals) and ids are
//! what crosses instance boundaries.

use rustc_hash::FxHashSet;

use coral_core::ids::{SlideId, SlideRef};

use crate::dom::{data, DomSurface, ElementKey, Part};

/// One non-hidden slide on the track
#[derive(Clone, Debug, PartialEq)]
pub struct SlideEntry {
    pub key: ElementKey,
    /// Own id: `data-slide-id` for originals, `data-clone-id` for clones
    pub id: SlideId,
    /// Id of the original this clone duplicates
    pub clone_of: Option<SlideId>,
    /// Ordinal among originals (the original's position for a clone)
    pub position: Option<usize>,
}

impl SlideEntry {
    pub fn is_clone(&self) -> bool {
        self.clone_of.is_some()
    }
}

/// Ordered view of the visible slides
#[derive(Clone, Debug, Default)]
pub struct SlideSet {
    entries: Vec<SlideEntry>,
    /// Set index of each original, by position
    originals: Vec<usize>,
}

impl SlideSet {
    /// Read the current slides from the surface
    pub fn scan<D: DomSurface + ?Sized>(dom: &D) -> Self {
        let mut entries = Vec::new();
        let mut originals = Vec::new();

        for key in dom.slides() {
            if dom.is_hidden(key) {
                continue;
            }
            let slide_id = dom.data(Part::Slide(key), data::SLIDE_ID).unwrap_or_default();
            if dom.is_clone(key) {
                let clone_id = dom.data(Part::Slide(key), data::CLONE_ID).unwrap_or_default();
                entries.push(SlideEntry {
                    key,
                    id: SlideId::new(clone_id),
                    clone_of: Some(SlideId::new(slide_id)),
                    position: None,
                });
            } else {
                originals.push(entries.len());
                entries.push(SlideEntry {
                    key,
                    id: SlideId::new(slide_id),
                    clone_of: None,
                    position: Some(originals.len() - 1),
                });
            }
        }

        let mut set = Self { entries, originals };
        for index in 0..set.entries.len() {
            if let Some(original) = set.entries[index].clone_of.clone() {
                set.entries[index].position = set
                    .index_of_id(&original)
                    .and_then(|found| set.entries[found].position);
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlideEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[SlideEntry] {
        &self.entries
    }

    /// Number of non-hidden, non-clone slides
    pub fn original_count(&self) -> usize {
        self.originals.len()
    }

    pub fn last_position(&self) -> Option<usize> {
        self.originals.len().checked_sub(1)
    }

    pub fn index_of_position(&self, position: usize) -> Option<usize> {
        self.originals.get(position).copied()
    }

    /// Set index of the original carrying `id`
    pub fn index_of_id(&self, id: &SlideId) -> Option<usize> {
        self.originals
            .iter()
            .copied()
            .find(|index| self.entries[*index].id == *id)
    }

    /// The original behind `index`; itself for originals
    ///
    /// `None` when a clone's original is no longer on the track.
    pub fn original_index(&self, index: usize) -> Option<usize> {
        let entry = self.entries.get(index)?;
        match &entry.clone_of {
            None => Some(index),
            Some(original) => self.index_of_id(original),
        }
    }

    /// Clone of the slide at `position` in the leading region (before the first original)
    pub fn leading_mirror(&self, position: usize) -> Option<usize> {
        let first = *self.originals.first()?;
        self.entries[..first]
            .iter()
            .position(|entry| entry.is_clone() && entry.position == Some(position))
    }

    /// Clone of the slide at `position` in the trailing region (after the last original)
    pub fn trailing_mirror(&self, position: usize) -> Option<usize> {
        let last = *self.originals.last()?;
        self.entries[last + 1..]
            .iter()
            .position(|entry| entry.is_clone() && entry.position == Some(position))
            .map(|offset| last + 1 + offset)
    }

    /// Cross-instance reference to the original behind `index`
    pub fn slide_ref(&self, index: usize) -> Option<SlideRef> {
        let original = &self.entries[self.original_index(index)?];
        Some(SlideRef::new(original.id.clone(), original.position?))
    }
}

/// Give every original lacking `data-slide-id` a unique one
///
/// Ids already present are kept; duplicates after the first are replaced.
/// Returns the number of slides that received a new id.
pub fn assign_slide_ids<D: DomSurface + ?Sized>(dom: &mut D) -> usize {
    let originals: Vec<ElementKey> = dom
        .slides()
        .into_iter()
        .filter(|key| !dom.is_clone(*key))
        .collect();

    let mut taken: FxHashSet<String> = FxHashSet::default();
    let mut missing = Vec::new();
    for key in &originals {
        match dom.data(Part::Slide(*key), data::SLIDE_ID) {
            Some(id) if !id.is_empty() && taken.insert(id.clone()) => {}
            _ => missing.push(*key),
        }
    }

    let mut counter = 0usize;
    for key in &missing {
        let id = loop {
            let candidate = format!("slide-{counter}");
            counter += 1;
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        dom.set_data(Part::Slide(*key), data::SLIDE_ID, Some(&id));
        taken.insert(id);
    }

    if !missing.is_empty() {
        tracing::trace!(assigned = missing.len(), "slides: assigned ids");
    }
    missing.len()
}
