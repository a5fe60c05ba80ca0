//! In-memory DOM surface
//!
//! A complete [`DomSurface`] with real layout arithmetic: slides are laid
//! out back to back along one axis, hidden slides take no space, and the
//! scroll offset is clamped to `[0, content - viewport]`. Both smooth and
//! instant scrolls apply immediately; every call is recorded so tests can
//! assert on the sequence.
//!
//! ```
//! use coral_core::layout::{Axis, ScrollBehavior};
//! use coral_scroll::dom::DomSurface;
//! use coral_scroll::memory::MemoryDom;
//!
//! let mut dom = MemoryDom::new(100.0).with_slides(3, 100.0);
//! dom.scroll_to(Axis::Horizontal, 1000.0, ScrollBehavior::Smooth);
//!
//! // Clamped to content (300) minus viewport (100)
//! assert_eq!(dom.scroll_offset(Axis::Horizontal), 200.0);
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use coral_core::layout::{Axis, Rect, ScrollBehavior, SnapAlignment};

use crate::dom::{classes, data, DomSurface, ElementKey, InsertAt, Part, TrackLayout};

/// Cross-axis size of every laid out box
const CROSS_EXTENT: f32 = 100.0;

#[derive(Clone, Debug, Default)]
struct MemoryElement {
    classes: FxHashSet<String>,
    data: FxHashMap<String, String>,
    /// Size along the scroll axis (slides only)
    extent: f32,
}

impl MemoryElement {
    fn with_class(class: &str) -> Self {
        let mut element = Self::default();
        element.classes.insert(class.to_string());
        element
    }
}

/// One recorded `scroll_to` call
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollCall {
    pub offset: f32,
    pub behavior: ScrollBehavior,
}

/// Headless slider markup
#[derive(Debug)]
pub struct MemoryDom {
    axis: Axis,
    viewport: f32,
    padding_start: f32,
    padding_end: f32,
    gap: f32,
    snap: Option<SnapAlignment>,

    root: MemoryElement,
    root_style: FxHashMap<String, String>,
    track: Option<MemoryElement>,
    slides: SlotMap<ElementKey, MemoryElement>,
    order: Vec<ElementKey>,

    indicator: Option<Vec<MemoryElement>>,
    previous_arrow: Option<MemoryElement>,
    next_arrow: Option<MemoryElement>,
    grab_overlay: Option<MemoryElement>,

    scroll: f32,
    scroll_log: Vec<ScrollCall>,
    class_mutations: usize,
}

impl MemoryDom {
    /// Horizontal track of the given viewport extent, no slides yet
    pub fn new(viewport: f32) -> Self {
        Self {
            axis: Axis::Horizontal,
            viewport,
            padding_start: 0.0,
            padding_end: 0.0,
            gap: 0.0,
            snap: Some(SnapAlignment::Start),
            root: MemoryElement::default(),
            root_style: FxHashMap::default(),
            track: Some(MemoryElement::with_class(classes::TRACK)),
            slides: SlotMap::with_key(),
            order: Vec::new(),
            indicator: None,
            previous_arrow: None,
            next_arrow: None,
            grab_overlay: None,
            scroll: 0.0,
            scroll_log: Vec::new(),
            class_mutations: 0,
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Append `count` slides of equal extent
    pub fn with_slides(mut self, count: usize, extent: f32) -> Self {
        for _ in 0..count {
            self.add_slide(extent);
        }
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_padding(mut self, start: f32, end: f32) -> Self {
        self.padding_start = start;
        self.padding_end = end;
        self
    }

    pub fn with_snap(mut self, snap: Option<SnapAlignment>) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_arrows(mut self) -> Self {
        self.previous_arrow = Some(MemoryElement::with_class(classes::PREVIOUS));
        self.next_arrow = Some(MemoryElement::with_class(classes::NEXT));
        self
    }

    pub fn with_indicator(mut self) -> Self {
        self.indicator = Some(Vec::new());
        self
    }

    pub fn with_grab_overlay(mut self) -> Self {
        self.grab_overlay = Some(MemoryElement::with_class(classes::GRAB_OVERLAY));
        self
    }

    pub fn with_root_class(mut self, class: &str) -> Self {
        self.root.classes.insert(class.to_string());
        self
    }

    /// Set a root dataset entry (configuration attributes)
    pub fn with_root_data(mut self, name: &str, value: &str) -> Self {
        self.root.data.insert(name.to_string(), value.to_string());
        self
    }

    /// Markup without a `.coral-scroll__slider` track
    pub fn without_track(mut self) -> Self {
        self.track = None;
        self
    }

    // ========================================================================
    // Mutation helpers (stand-ins for page scripts editing the markup)
    // ========================================================================

    pub fn add_slide(&mut self, extent: f32) -> ElementKey {
        let mut slide = MemoryElement::with_class(classes::SLIDE);
        slide.extent = extent;
        let key = self.slides.insert(slide);
        self.order.push(key);
        key
    }

    pub fn set_hidden(&mut self, key: ElementKey, hidden: bool) {
        self.set_class(Part::Slide(key), classes::HIDDEN, hidden);
        self.clamp_scroll();
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn scroll_log(&self) -> &[ScrollCall] {
        &self.scroll_log
    }

    pub fn clear_scroll_log(&mut self) {
        self.scroll_log.clear();
    }

    /// Number of class changes that actually altered an element
    pub fn class_mutations(&self) -> usize {
        self.class_mutations
    }

    pub fn root_style(&self, property: &str) -> Option<&str> {
        self.root_style.get(property).map(String::as_str)
    }

    /// Slides carrying `js-active`, in document order
    pub fn active_slides(&self) -> Vec<ElementKey> {
        self.order
            .iter()
            .copied()
            .filter(|key| self.has_class(Part::Slide(*key), classes::ACTIVE))
            .collect()
    }

    /// `data-index` of dots carrying `js-active`
    pub fn active_dots(&self) -> Vec<usize> {
        self.indicator
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, dot)| dot.classes.contains(classes::ACTIVE))
            .map(|(index, _)| index)
            .collect()
    }

    // ========================================================================
    // Layout
    // ========================================================================

    fn visible(&self) -> impl Iterator<Item = (ElementKey, &MemoryElement)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.slides.get(*key).map(|slide| (*key, slide)))
            .filter(|(_, slide)| !slide.classes.contains(classes::HIDDEN))
    }

    fn content_extent(&self) -> f32 {
        let (sum, count) = self
            .visible()
            .fold((0.0, 0usize), |(sum, count), (_, slide)| {
                (sum + slide.extent, count + 1)
            });
        let gaps = self.gap * count.saturating_sub(1) as f32;
        self.padding_start + sum + gaps + self.padding_end
    }

    fn max_scroll(&self) -> f32 {
        (self.content_extent() - self.viewport).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    fn axis_rect(&self, start: f32, extent: f32) -> Rect {
        match self.axis {
            Axis::Horizontal => Rect::new(start, 0.0, extent, CROSS_EXTENT),
            Axis::Vertical => Rect::new(0.0, start, CROSS_EXTENT, extent),
        }
    }

    fn element(&self, part: Part) -> Option<&MemoryElement> {
        match part {
            Part::Root => Some(&self.root),
            Part::Track => self.track.as_ref(),
            Part::Slide(key) => self.slides.get(key),
            Part::Dot(index) => self.indicator.as_ref().and_then(|dots| dots.get(index)),
            Part::PreviousArrow => self.previous_arrow.as_ref(),
            Part::NextArrow => self.next_arrow.as_ref(),
            Part::GrabOverlay => self.grab_overlay.as_ref(),
            Part::Indicator => None,
        }
    }

    fn element_mut(&mut self, part: Part) -> Option<&mut MemoryElement> {
        match part {
            Part::Root => Some(&mut self.root),
            Part::Track => self.track.as_mut(),
            Part::Slide(key) => self.slides.get_mut(key),
            Part::Dot(index) => self.indicator.as_mut().and_then(|dots| dots.get_mut(index)),
            Part::PreviousArrow => self.previous_arrow.as_mut(),
            Part::NextArrow => self.next_arrow.as_mut(),
            Part::GrabOverlay => self.grab_overlay.as_mut(),
            Part::Indicator => None,
        }
    }
}

impl DomSurface for MemoryDom {
    fn has_part(&self, part: Part) -> bool {
        match part {
            Part::Indicator => self.indicator.is_some(),
            other => self.element(other).is_some(),
        }
    }

    fn has_class(&self, part: Part, class: &str) -> bool {
        self.element(part)
            .is_some_and(|element| element.classes.contains(class))
    }

    fn set_class(&mut self, part: Part, class: &str, enabled: bool) {
        let Some(element) = self.element_mut(part) else {
            return;
        };
        let changed = if enabled {
            element.classes.insert(class.to_string())
        } else {
            element.classes.remove(class)
        };
        if changed {
            self.class_mutations += 1;
        }
    }

    fn data(&self, part: Part, name: &str) -> Option<String> {
        self.element(part)
            .and_then(|element| element.data.get(name).cloned())
    }

    fn set_data(&mut self, part: Part, name: &str, value: Option<&str>) {
        let Some(element) = self.element_mut(part) else {
            return;
        };
        match value {
            Some(value) => {
                element.data.insert(name.to_string(), value.to_string());
            }
            None => {
                element.data.remove(name);
            }
        }
    }

    fn root_matches(&self, selector: &str) -> bool {
        let class = selector.trim();
        let class = class.strip_prefix('.').unwrap_or(class);
        !class.is_empty() && self.root.classes.contains(class)
    }

    fn set_root_style(&mut self, property: &str, value: &str) {
        self.root_style
            .insert(property.to_string(), value.to_string());
    }

    fn snap_alignment(&self) -> Option<SnapAlignment> {
        self.snap
    }

    fn slides(&self) -> Vec<ElementKey> {
        self.order.clone()
    }

    fn slide_rect(&self, key: ElementKey) -> Option<Rect> {
        let mut cursor = self.padding_start - self.scroll;
        for (visible_key, slide) in self.visible() {
            if visible_key == key {
                return Some(self.axis_rect(cursor, slide.extent));
            }
            cursor += slide.extent + self.gap;
        }
        None
    }

    fn insert_clone(&mut self, source: ElementKey, at: InsertAt) -> Option<ElementKey> {
        let copy = self.slides.get(source)?.clone();
        let index = match at {
            InsertAt::Before(anchor) => self.order.iter().position(|key| *key == anchor)?,
            InsertAt::End => self.order.len(),
        };
        let key = self.slides.insert(copy);
        self.order.insert(index, key);
        Some(key)
    }

    fn remove_slide(&mut self, key: ElementKey) {
        if self.slides.remove(key).is_some() {
            self.order.retain(|other| *other != key);
            self.clamp_scroll();
        }
    }

    fn track_layout(&self, axis: Axis) -> Option<TrackLayout> {
        self.track.as_ref()?;
        let (padding_start, padding_end) = if axis == self.axis {
            (self.padding_start, self.padding_end)
        } else {
            (0.0, 0.0)
        };
        Some(TrackLayout {
            rect: self.axis_rect(0.0, self.viewport),
            padding_start,
            padding_end,
            gap: self.gap,
        })
    }

    fn scroll_offset(&self, axis: Axis) -> f32 {
        if axis == self.axis {
            self.scroll
        } else {
            0.0
        }
    }

    fn scroll_to(&mut self, axis: Axis, offset: f32, behavior: ScrollBehavior) {
        self.scroll_log.push(ScrollCall { offset, behavior });
        if axis == self.axis && self.track.is_some() {
            self.scroll = offset;
            self.clamp_scroll();
        }
    }

    fn render_dots(&mut self, count: usize) {
        let Some(dots) = self.indicator.as_mut() else {
            return;
        };
        *dots = (0..count)
            .map(|index| {
                let mut dot = MemoryElement::with_class(classes::DOT);
                dot.data.insert(data::INDEX.to_string(), index.to_string());
                dot
            })
            .collect();
    }

    fn dot_count(&self) -> usize {
        self.indicator.as_ref().map_or(0, Vec::len)
    }
}
