//! DOM surface contract
//!
//! The slider never touches a document directly. Everything it reads or
//! mutates goes through [`DomSurface`], addressed by [`Part`]. Class names
//! and dataset keys are fixed so existing markup keeps working:
//!
//! ```text
//! <coral-scroll data-coral-scroll-id="…" style="--animation-state: running">
//!   <div class="coral-scroll__slider" data-clones-active="true">
//!     <div class="slide js-clone" data-slide-id="c" data-clone-id="clone-…">
//!     <div class="slide js-active" data-slide-id="a">
//!     <div class="slide js-hidden">
//!   </div>
//!   <div class="coral-scroll__grab-overlay">
//!   <div class="coral-scroll__indicator"><button class="dot" data-index="0">…</div>
//!   <div class="coral-scroll__arrows"><button class="previous"><button class="next"></div>
//! </coral-scroll>
//! ```

use coral_core::layout::{Axis, Rect, ScrollBehavior, SnapAlignment};

slotmap::new_key_type! {
    /// Handle to a slide element owned by the host surface
    pub struct ElementKey;
}

/// Class names of the host markup
pub mod classes {
    pub const TRACK: &str = "coral-scroll__slider";
    pub const GRAB_OVERLAY: &str = "coral-scroll__grab-overlay";
    pub const INDICATOR: &str = "coral-scroll__indicator";
    pub const ARROWS: &str = "coral-scroll__arrows";
    pub const PREVIOUS: &str = "previous";
    pub const NEXT: &str = "next";
    pub const SLIDE: &str = "slide";
    pub const DOT: &str = "dot";

    pub const HIDDEN: &str = "js-hidden";
    pub const CLONE: &str = "js-clone";
    pub const ACTIVE: &str = "js-active";
    pub const DISABLED: &str = "js-disabled";
    pub const UPDATING_SLIDES: &str = "js-updating-slides";
}

/// Dataset keys (`element.dataset`) of the host markup
pub mod data {
    /// `data-slide-id`
    pub const SLIDE_ID: &str = "slideId";
    /// `data-clone-id`
    pub const CLONE_ID: &str = "cloneId";
    /// `data-clones-active` on the track
    pub const CLONES_ACTIVE: &str = "clonesActive";
    /// `data-coral-scroll-id` on the root
    pub const CORAL_SCROLL_ID: &str = "coralScrollId";
    /// `data-deeplink-target`
    pub const DEEPLINK_TARGET: &str = "deeplinkTarget";
    /// `data-index` on indicator dots
    pub const INDEX: &str = "index";
}

/// Root style property toggled by autoplay
pub const ANIMATION_STATE_PROPERTY: &str = "--animation-state";

/// Addressable element of one slider
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The custom element itself
    Root,
    /// `.coral-scroll__slider`
    Track,
    Slide(ElementKey),
    /// Indicator dot by `data-index`
    Dot(usize),
    PreviousArrow,
    NextArrow,
    GrabOverlay,
    Indicator,
}

/// Where a cloned slide is inserted on the track
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertAt {
    /// Immediately before the given slide
    Before(ElementKey),
    /// After the last child of the track
    End,
}

/// Measured box of the slide track
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackLayout {
    /// Bounding rect in viewport coordinates
    pub rect: Rect,
    /// Leading padding along the scroll axis
    pub padding_start: f32,
    /// Trailing padding along the scroll axis
    pub padding_end: f32,
    /// Gap between consecutive slides
    pub gap: f32,
}

/// Host document access for one slider instance
pub trait DomSurface {
    /// Whether an (optional) element exists in the markup
    fn has_part(&self, part: Part) -> bool;

    fn has_class(&self, part: Part, class: &str) -> bool;

    /// Add or remove a class; missing parts are ignored
    fn set_class(&mut self, part: Part, class: &str, enabled: bool);

    fn data(&self, part: Part, name: &str) -> Option<String>;

    /// Set (`Some`) or remove (`None`) a dataset entry
    fn set_data(&mut self, part: Part, name: &str, value: Option<&str>);

    /// Whether the root element matches a class selector (`thumbs-a` or `.thumbs-a`)
    fn root_matches(&self, selector: &str) -> bool;

    fn set_root_style(&mut self, property: &str, value: &str);

    /// Computed `scroll-snap-align` of the first visible slide
    fn snap_alignment(&self) -> Option<SnapAlignment>;

    /// Every `.slide` child of the track, in document order
    fn slides(&self) -> Vec<ElementKey>;

    /// Bounding rect of a slide; `None` when it is not laid out
    fn slide_rect(&self, key: ElementKey) -> Option<Rect>;

    /// Deep-copy a slide (classes and dataset included) onto the track
    fn insert_clone(&mut self, source: ElementKey, at: InsertAt) -> Option<ElementKey>;

    fn remove_slide(&mut self, key: ElementKey);

    fn track_layout(&self, axis: Axis) -> Option<TrackLayout>;

    fn scroll_offset(&self, axis: Axis) -> f32;

    /// Scroll the track; smooth scrolls are fire-and-forget
    fn scroll_to(&mut self, axis: Axis, offset: f32, behavior: ScrollBehavior);

    /// Replace the indicator's dots with `count` fresh ones
    fn render_dots(&mut self, count: usize);

    fn dot_count(&self) -> usize;

    fn is_hidden(&self, key: ElementKey) -> bool {
        self.has_class(Part::Slide(key), classes::HIDDEN)
    }

    fn is_clone(&self, key: ElementKey) -> bool {
        self.has_class(Part::Slide(key), classes::CLONE)
    }
}

/// Dataset view of the root element, for reading configuration
pub struct RootAttributes<'a, D: ?Sized>(pub &'a D);

impl<D: DomSurface + ?Sized> coral_core::config::AttributeSource for RootAttributes<'_, D> {
    fn data(&self, name: &str) -> Option<String> {
        self.0.data(Part::Root, name)
    }
}
