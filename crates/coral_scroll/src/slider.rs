//! Slider instance
//!
//! A `Slider` owns one DOM surface and wires the engine together:
//!
//! ```text
//!  pointer / keys / timers ─┐
//!                           ├─► navigation::resolve ─► scroll moves ─► presentation
//!  bus: request-to-slide ───┘                                              │
//!                                                                          ▼
//!                                                     bus: scrolled-to-slide, thumbs
//! ```
//!
//! State lives behind `Rc<RefCell<_>>` so bus handlers can reach it. Work
//! that produces bus messages collects them in an outbox while the state is
//! borrowed; they are published after the borrow ends, so a handler of this
//! same slider can run as a consequence without re-entering the borrow.
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use coral_core::bus::MessageBus;
//! use coral_scroll::memory::MemoryDom;
//! use coral_scroll::slider::Slider;
//!
//! let bus = MessageBus::new();
//! let dom = MemoryDom::new(100.0).with_slides(3, 100.0).with_arrows();
//! let slider = Slider::mount(dom, &bus, Instant::now()).unwrap();
//!
//! slider.next(Instant::now());
//! assert_eq!(slider.state().shadow_active_index, 1);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use coral_core::bus::{
    BusEvent, MessageBus, RequestToSlide, ScrolledToSlide, Subscription, UpdateRequest, WeakBus,
};
use coral_core::config::SliderConfig;
use coral_core::error::{CoralError, Result};
use coral_core::ids::{InstanceId, SlideId, SlideRef};
use coral_core::layout::{Axis, ScrollBehavior};
use coral_core::timer::Debouncer;

use crate::autoplay::{AnimationState, Autoplay};
use crate::clones::ensure_clones;
use crate::coordinator::{is_addressed, Outbox};
use crate::dom::{classes, data, DomSurface, Part, RootAttributes, ANIMATION_STATE_PROPERTY};
use crate::drag::DragTracker;
use crate::geometry::{read_state, SliderSnapshot};
use crate::navigation::{self, Cursor, NavRequest, Resolution, ResolvedSlide, ScrollMove};
use crate::presentation;
use crate::settle::{self, ScrollSettle, SettleOutcome};
use crate::slides::{assign_slide_ids, SlideSet};

/// Window that coalesces content-change notifications
pub const CONTENT_CHANGE_WINDOW: Duration = Duration::from_millis(10);

/// Mutable per-instance navigation state
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationState {
    /// Last slide this instance exposed and announced
    pub active_slide_id: Option<SlideId>,
    /// Position the track is scrolled to; the only "active" notion of a thumbs follower
    pub shadow_active_index: usize,
    pub is_dragging: bool,
    pub is_autoplay_paused: bool,
    pub instance_id: InstanceId,
}

/// Keyboard navigation keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

// ============================================================================
// Inner state
// ============================================================================

struct SliderInner<D> {
    dom: D,
    config: SliderConfig,
    state: NavigationState,
    drag: DragTracker,
    settle: ScrollSettle,
    content: Debouncer<()>,
    autoplay: Option<Autoplay>,
    /// Last value written to `--animation-state`
    animation_state: Option<AnimationState>,
    outbox: Outbox,
    disposed: bool,
}

impl<D: DomSurface> SliderInner<D> {
    fn is_follower(&self) -> bool {
        self.config.is_thumbs_slider
    }

    fn scan(&self) -> SlideSet {
        SlideSet::scan(&self.dom)
    }

    fn read(&self, set: &SlideSet) -> Option<SliderSnapshot> {
        read_state(&self.dom, set, &self.config)
    }

    fn cursor(&self, set: &SlideSet, snapshot: Option<&SliderSnapshot>) -> Option<Cursor> {
        if self.is_follower() {
            let last = set.last_position()?;
            let index = set.index_of_position(self.state.shadow_active_index.min(last))?;
            return Some(Cursor::at(index));
        }
        snapshot.map(|s| Cursor {
            index: s.active_index,
            at_track_end: s.is_last_slide,
        })
    }

    // ------------------------------------------------------------------------
    // Slide set maintenance
    // ------------------------------------------------------------------------

    /// Ids, dots and clones for the current markup
    fn rebuild(&mut self) {
        assign_slide_ids(&mut self.dom);
        if self.dom.has_part(Part::Indicator) {
            let count = SlideSet::scan(&self.dom).original_count();
            self.dom.render_dots(count);
        }
        ensure_clones(&mut self.dom, self.config.slides_per_group, self.config.infinite);
    }

    fn update_slides(&mut self) {
        self.dom.set_class(Part::Track, classes::UPDATING_SLIDES, true);
        self.rebuild();

        let set = self.scan();
        let index = self
            .state
            .active_slide_id
            .as_ref()
            .and_then(|id| set.index_of_id(id))
            .or_else(|| {
                let last = set.last_position()?;
                set.index_of_position(self.state.shadow_active_index.min(last))
            });
        if let Some(index) = index {
            self.scroll_to_index(&set, index, ScrollBehavior::Instant);
            self.expose(&set, index);
        }

        self.dom.set_class(Part::Track, classes::UPDATING_SLIDES, false);
        tracing::debug!(
            instance = %self.state.instance_id,
            slides = set.original_count(),
            "slider: slides updated"
        );
    }

    /// Initial slide: id, then deeplink target, then numeric position
    fn start_index(&self, set: &SlideSet) -> Option<usize> {
        let fallback = set.index_of_position(0);
        let Some(start) = self.config.start_slide_id.as_deref() else {
            return fallback;
        };
        set.index_of_id(&SlideId::from(start))
            .or_else(|| {
                set.entries().iter().position(|entry| {
                    !entry.is_clone()
                        && self.dom.data(Part::Slide(entry.key), data::DEEPLINK_TARGET).as_deref()
                            == Some(start)
                })
            })
            .or_else(|| start.parse::<usize>().ok().and_then(|p| set.index_of_position(p)))
            .or_else(|| {
                tracing::debug!(start, "slider: start slide not found");
                fallback
            })
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    fn scroll_to_index(&mut self, set: &SlideSet, index: usize, behavior: ScrollBehavior) {
        let Some(target) = self.read(set).and_then(|s| s.scroll_target(index)) else {
            return;
        };
        self.dom.scroll_to(self.config.axis, target, behavior);
    }

    fn navigate(&mut self, request: &NavRequest) -> Option<Resolution> {
        let set = self.scan();
        let snapshot = self.read(&set);
        let cursor = self.cursor(&set, snapshot.as_ref())?;
        let resolution = navigation::resolve(&set, cursor, request, &self.config)?;

        for step in &resolution.moves {
            match *step {
                ScrollMove::Instant(index) => {
                    self.scroll_to_index(&set, index, ScrollBehavior::Instant)
                }
                ScrollMove::Smooth(index) => {
                    self.scroll_to_index(&set, index, ScrollBehavior::Smooth)
                }
            }
        }

        self.state.shadow_active_index = resolution.resolved.position;
        if !self.is_follower() {
            self.commit(&set, &resolution.resolved);
        }
        Some(resolution)
    }

    /// Present `index` and announce it when it differs from the known slide
    fn expose(&mut self, set: &SlideSet, index: usize) {
        let Some(resolved) = navigation::describe(set, index, &self.config) else {
            return;
        };
        self.state.shadow_active_index = resolved.position;
        if !self.is_follower() {
            self.commit(set, &resolved);
        }
    }

    fn commit(&mut self, set: &SlideSet, resolved: &ResolvedSlide) {
        let snapshot = self.read(set);
        presentation::apply(&mut self.dom, set, resolved, snapshot.as_ref(), &self.config);

        if self.state.active_slide_id.as_ref() == Some(&resolved.id) {
            return;
        }
        self.state.active_slide_id = Some(resolved.id.clone());
        let slide = resolved.slide_ref();
        tracing::debug!(
            instance = %self.state.instance_id,
            slide = %slide.id,
            position = slide.position,
            "slider: active slide changed"
        );

        self.outbox.announce_slide_changed(slide.clone());
        if let Some(thumbs) = self.config.thumbs_target_selector.as_deref() {
            self.outbox.request_slide(thumbs, slide);
        }
    }

    fn settle(&mut self) {
        let set = self.scan();
        let Some(snapshot) = self.read(&set) else {
            return;
        };

        // Followers keep the position their primary gave them
        if self.is_follower() {
            let outcome = settle::evaluate(&set, &snapshot, None);
            if let SettleOutcome::Redirect { original, .. } = outcome {
                self.scroll_to_index(&set, original, ScrollBehavior::Instant);
            }
            return;
        }

        let last_known = self.state.active_slide_id.clone();
        match settle::evaluate(&set, &snapshot, last_known.as_ref()) {
            SettleOutcome::Unchanged => {}
            SettleOutcome::Redirect { clone, original } => {
                tracing::trace!(clone, original, "slider: settled on clone");
                self.scroll_to_index(&set, original, ScrollBehavior::Instant);
                self.expose(&set, original);
            }
            SettleOutcome::Changed(index) => self.expose(&set, index),
        }
    }

    /// Follow the slide a peer addressed to this instance
    fn follow(&mut self, target: &SlideRef) {
        let set = self.scan();
        let request = if set.index_of_id(&target.id).is_some() {
            NavRequest::TargetId(target.id.clone())
        } else {
            NavRequest::TargetPosition(target.position)
        };
        let Some(Resolution { resolved, .. }) = self.navigate(&request) else {
            tracing::debug!(
                slide = %target.id,
                position = target.position,
                "slider: requested slide not found"
            );
            return;
        };
        if self.is_follower() {
            presentation::mark_active_slide(&mut self.dom, &set, resolved.index);
        }
    }

    // ------------------------------------------------------------------------
    // Bus handlers
    // ------------------------------------------------------------------------

    fn on_request(&mut self, request: &RequestToSlide, _now: Instant) {
        if request.origin == self.state.instance_id || !is_addressed(&self.dom, request) {
            return;
        }
        self.follow(&request.target);
    }

    fn on_scrolled(&mut self, message: &ScrolledToSlide, now: Instant) {
        if message.origin != self.state.instance_id {
            return;
        }
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.hold(now);
        }
    }

    fn on_update(&mut self, request: &UpdateRequest, _now: Instant) {
        if request.instance == self.state.instance_id {
            self.update_slides();
        }
    }

    // ------------------------------------------------------------------------
    // Interaction
    // ------------------------------------------------------------------------

    fn pause_autoplay(&mut self) {
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.pause();
        }
        self.sync_animation_state();
    }

    fn resume_autoplay(&mut self, now: Instant) {
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.resume(now);
        }
        self.sync_animation_state();
    }

    fn sync_animation_state(&mut self) {
        let Some(autoplay) = self.autoplay.as_ref() else {
            return;
        };
        let state = autoplay.state();
        self.state.is_autoplay_paused = autoplay.is_paused();
        if self.animation_state != Some(state) {
            self.dom.set_root_style(ANIMATION_STATE_PROPERTY, state.as_css());
            self.animation_state = Some(state);
        }
    }

    fn pointer_down(&mut self, position: f32) {
        self.pause_autoplay();
        if !self.dom.has_part(Part::GrabOverlay) {
            return;
        }
        self.dom.set_class(Part::GrabOverlay, classes::ACTIVE, true);
        self.dom.set_class(Part::Track, classes::ACTIVE, true);
        self.drag.begin(position);
        self.state.is_dragging = true;
    }

    fn pointer_move(&mut self, position: f32, now: Instant) {
        if self.state.is_dragging {
            self.drag.move_to(position, now);
        }
    }

    fn release_grab(&mut self, now: Instant) {
        if !self.state.is_dragging {
            return;
        }
        self.dom.set_class(Part::GrabOverlay, classes::ACTIVE, false);
        self.drag.end(now);
        self.state.is_dragging = false;
    }

    fn key(&mut self, key: NavKey) -> bool {
        let request = match (key, self.config.axis) {
            (NavKey::ArrowRight, Axis::Horizontal) | (NavKey::ArrowDown, Axis::Vertical) => {
                NavRequest::next()
            }
            (NavKey::ArrowLeft, Axis::Horizontal) | (NavKey::ArrowUp, Axis::Vertical) => {
                NavRequest::previous()
            }
            (NavKey::Home, _) => NavRequest::TargetPosition(0),
            (NavKey::End, _) => match self.scan().last_position() {
                Some(last) => NavRequest::TargetPosition(last),
                None => return false,
            },
            _ => return false,
        };
        self.navigate(&request);
        true
    }

    fn slide_click(&mut self, id: &SlideId) {
        if !self.is_follower() {
            self.navigate(&NavRequest::TargetId(id.clone()));
            return;
        }
        let Some(parent) = self.config.thumbs_parent_selector.clone() else {
            tracing::debug!(slide = %id, "slider: thumb click without thumbsParentClass");
            return;
        };
        let set = self.scan();
        if let Some(slide) = set.index_of_id(id).and_then(|index| set.slide_ref(index)) {
            self.outbox.request_slide(&parent, slide);
        }
    }

    fn tick(&mut self, now: Instant) {
        if self.content.poll(now).is_some() {
            self.update_slides();
        }
        if let Some(direction) = self.drag.poll_step(now) {
            self.navigate(&NavRequest::Step(direction));
        }
        if self.drag.poll_release(now) {
            self.dom.set_class(Part::Track, classes::ACTIVE, false);
        }
        if self.settle.poll(now) {
            self.settle();
        }
        let advance = self.autoplay.as_mut().is_some_and(|a| a.poll(now));
        if advance {
            self.navigate(&NavRequest::next());
        }
        self.sync_animation_state();
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.drag.cancel();
        self.settle.cancel();
        self.content.cancel();
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.cancel();
        }
        self.outbox.clear();
        tracing::debug!(instance = %self.state.instance_id, "slider: disposed");
    }
}

// ============================================================================
// Slider
// ============================================================================

/// One mounted slider instance
pub struct Slider<D: DomSurface + 'static> {
    inner: Rc<RefCell<SliderInner<D>>>,
    bus: MessageBus,
    subscriptions: Vec<Subscription>,
}

impl<D: DomSurface + 'static> Slider<D> {
    /// Mount with configuration read from the root's attributes
    pub fn mount(dom: D, bus: &MessageBus, now: Instant) -> Result<Self> {
        let config = SliderConfig::from_attributes(&RootAttributes(&dom), dom.snap_alignment());
        Self::with_config(dom, config, bus, now)
    }

    /// Mount, rejecting the first malformed root attribute
    ///
    /// Unlike [`Slider::mount`], a bad value is a [`CoralError::Config`]
    /// instead of a logged fallback to its default.
    pub fn mount_strict(dom: D, bus: &MessageBus, now: Instant) -> Result<Self> {
        let config = SliderConfig::parse(&RootAttributes(&dom), dom.snap_alignment())?;
        Self::with_config(dom, config, bus, now)
    }

    /// Mount with an explicit configuration
    pub fn with_config(
        mut dom: D,
        mut config: SliderConfig,
        bus: &MessageBus,
        now: Instant,
    ) -> Result<Self> {
        if !dom.has_part(Part::Track) {
            return Err(CoralError::MissingTrack);
        }
        if config.snap_alignment.is_none() {
            config.snap_alignment = dom.snap_alignment();
        }

        let instance_id = InstanceId::next();
        dom.set_data(Part::Root, data::CORAL_SCROLL_ID, Some(&instance_id.to_string()));

        let autoplay = config
            .autoplay_enabled()
            .then(|| config.auto_scroll_interval())
            .flatten()
            .map(Autoplay::new);

        let mut inner = SliderInner {
            drag: DragTracker::new(config.grab_velocity),
            dom,
            config,
            state: NavigationState {
                active_slide_id: None,
                shadow_active_index: 0,
                is_dragging: false,
                is_autoplay_paused: false,
                instance_id,
            },
            settle: ScrollSettle::default(),
            content: Debouncer::new(CONTENT_CHANGE_WINDOW),
            autoplay,
            animation_state: None,
            outbox: Outbox::new(instance_id),
            disposed: false,
        };

        inner.rebuild();
        let set = inner.scan();
        if let Some(start) = inner.start_index(&set) {
            inner.scroll_to_index(&set, start, ScrollBehavior::Instant);
            inner.expose(&set, start);
        }
        // Mounting is not a navigation: only the thumbs strip needs to hear about it
        let events: Vec<_> = inner
            .outbox
            .take()
            .into_iter()
            .filter(|event| !matches!(event, BusEvent::ScrolledToSlide(_)))
            .collect();

        if let Some(autoplay) = inner.autoplay.as_mut() {
            autoplay.start(now);
        }
        inner.sync_animation_state();

        tracing::debug!(
            instance = %instance_id,
            slides = set.original_count(),
            infinite = inner.config.infinite,
            thumbs = inner.config.is_thumbs_slider,
            "slider: mounted"
        );

        let inner = Rc::new(RefCell::new(inner));
        let weak = Rc::downgrade(&inner);
        let subscriptions = vec![
            bus.subscribe::<RequestToSlide>(handler::<D, RequestToSlide>(
                weak.clone(),
                bus.downgrade(),
                SliderInner::on_request,
            )),
            bus.subscribe::<ScrolledToSlide>(handler::<D, ScrolledToSlide>(
                weak.clone(),
                bus.downgrade(),
                SliderInner::on_scrolled,
            )),
            bus.subscribe::<UpdateRequest>(handler::<D, UpdateRequest>(
                weak,
                bus.downgrade(),
                SliderInner::on_update,
            )),
        ];

        bus.publish_all(events, now);

        Ok(Self {
            inner,
            bus: bus.clone(),
            subscriptions,
        })
    }

    pub fn instance_id(&self) -> InstanceId {
        self.inner.borrow().state.instance_id
    }

    pub fn config(&self) -> SliderConfig {
        self.inner.borrow().config.clone()
    }

    pub fn state(&self) -> NavigationState {
        self.inner.borrow().state.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    /// Read access to the surface
    pub fn with_dom<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.inner.borrow().dom)
    }

    /// Mutate the markup from outside; follow up with [`Slider::on_content_changed`]
    pub fn with_dom_mut<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut self.inner.borrow_mut().dom)
    }

    /// Run `f` on the inner state, then publish what it produced
    fn drive<R: Default>(&self, now: Instant, f: impl FnOnce(&mut SliderInner<D>) -> R) -> R {
        let (result, events) = {
            let Ok(mut inner) = self.inner.try_borrow_mut() else {
                tracing::warn!("slider: re-entrant call ignored");
                return R::default();
            };
            if inner.disposed {
                return R::default();
            }
            let result = f(&mut *inner);
            (result, inner.outbox.take())
        };
        self.bus.publish_all(events, now);
        result
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn next(&self, now: Instant) {
        self.navigate(NavRequest::next(), now);
    }

    pub fn previous(&self, now: Instant) {
        self.navigate(NavRequest::previous(), now);
    }

    /// Resolve and perform a request; `false` when the slide did not change
    pub fn navigate(&self, request: NavRequest, now: Instant) -> bool {
        self.drive(now, |inner| inner.navigate(&request).is_some_and(|r| r.changed))
    }

    pub fn on_dot_click(&self, index: usize, now: Instant) {
        self.navigate(NavRequest::TargetPosition(index), now);
    }

    /// A slide (or thumb) was clicked
    pub fn on_slide_click(&self, id: &SlideId, now: Instant) {
        self.drive(now, |inner| inner.slide_click(id));
    }

    /// Returns whether the key was handled
    pub fn on_key(&self, key: NavKey, now: Instant) -> bool {
        self.drive(now, |inner| inner.key(key))
    }

    // ------------------------------------------------------------------------
    // Pointer and scroll input
    // ------------------------------------------------------------------------

    /// Pointer or touch pressed; `position` is along the scroll axis
    pub fn on_pointer_down(&self, position: f32, now: Instant) {
        self.drive(now, |inner| inner.pointer_down(position));
    }

    pub fn on_pointer_move(&self, position: f32, now: Instant) {
        self.drive(now, |inner| inner.pointer_move(position, now));
    }

    pub fn on_pointer_up(&self, now: Instant) {
        self.drive(now, |inner| {
            inner.resume_autoplay(now);
            inner.release_grab(now);
        });
    }

    pub fn on_pointer_enter(&self, now: Instant) {
        self.drive(now, |inner| inner.pause_autoplay());
    }

    pub fn on_pointer_leave(&self, now: Instant) {
        self.drive(now, |inner| {
            inner.resume_autoplay(now);
            inner.release_grab(now);
        });
    }

    /// The track stopped scrolling
    pub fn on_scroll_end(&self, now: Instant) {
        self.drive(now, |inner| inner.settle.notify(now));
    }

    /// Slides were added, removed or hidden
    pub fn on_content_changed(&self, now: Instant) {
        self.drive(now, |inner| inner.content.call((), now));
    }

    /// Run every timer that became due
    pub fn tick(&self, now: Instant) {
        self.drive(now, |inner| inner.tick(now));
    }

    /// Release bus subscriptions and cancel all timers
    ///
    /// Every later call is a no-op. Dropping the slider disposes it.
    pub fn dispose(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.dispose();
        }
    }
}

impl<D: DomSurface + 'static> Drop for Slider<D> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<D: DomSurface + 'static> std::fmt::Debug for Slider<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Slider")
                .field("state", &inner.state)
                .field("config", &inner.config)
                .field("subscriptions", &self.subscriptions.len())
                .finish(),
            Err(_) => f.write_str("Slider { <busy> }"),
        }
    }
}

/// Bus handler that forwards to the slider while it is alive
fn handler<D, M>(
    inner: Weak<RefCell<SliderInner<D>>>,
    bus: WeakBus,
    f: fn(&mut SliderInner<D>, &M, Instant),
) -> impl Fn(&M, Instant) + 'static
where
    D: DomSurface + 'static,
    M: 'static,
{
    move |message: &M, now: Instant| {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let events = {
            let Ok(mut inner) = inner.try_borrow_mut() else {
                tracing::warn!("slider: busy, bus message dropped");
                return;
            };
            if inner.disposed {
                return;
            }
            f(&mut *inner, message, now);
            inner.outbox.take()
        };
        if let Some(bus) = bus.upgrade() {
            bus.publish_all(events, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator;
    use crate::memory::{MemoryDom, ScrollCall};
    use coral_core::error::ConfigError;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Record every `scrolled-to-slide` on the bus
    fn announcements(bus: &MessageBus) -> (Rc<RefCell<Vec<SlideRef>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let sub = bus.subscribe::<ScrolledToSlide>(move |msg, _| {
            log.borrow_mut().push(msg.active.clone())
        });
        (seen, sub)
    }

    fn finite_config() -> SliderConfig {
        SliderConfig::default()
    }

    fn infinite_config() -> SliderConfig {
        SliderConfig {
            infinite: true,
            ..SliderConfig::default()
        }
    }

    fn tick_range(slider: &Slider<MemoryDom>, t0: Instant, from: u64, to: u64) {
        for t in (from..=to).step_by(10) {
            slider.tick(t0 + ms(t));
        }
    }

    fn active_id(slider: &Slider<MemoryDom>) -> Option<String> {
        slider.state().active_slide_id.map(|id| id.to_string())
    }

    #[test]
    fn test_mount_without_track_fails() {
        let bus = MessageBus::new();
        let dom = MemoryDom::new(100.0).without_track().with_slides(2, 100.0);
        let result = Slider::mount(dom, &bus, Instant::now());
        assert!(matches!(result, Err(CoralError::MissingTrack)));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_strict_mount_rejects_malformed_attribute() {
        let bus = MessageBus::new();
        let dom = MemoryDom::new(100.0)
            .with_slides(3, 100.0)
            .with_root_data("grabVelocity", "fast");
        let result = Slider::mount_strict(dom, &bus, Instant::now());
        assert!(matches!(
            result,
            Err(CoralError::Config(ConfigError::InvalidNumber { name: "grabVelocity", .. }))
        ));
        assert_eq!(bus.subscriber_count(), 0);

        let dom = MemoryDom::new(100.0)
            .with_slides(3, 100.0)
            .with_root_data("grabVelocity", "40")
            .with_root_data("infiniteScroll", "");
        let slider = Slider::mount_strict(dom, &bus, Instant::now()).unwrap();
        assert_eq!(active_id(&slider).as_deref(), Some("slide-0"));
        assert_eq!(bus.subscriber_count(), 3);
    }

    #[test]
    fn test_mount_tags_and_presents() {
        let bus = MessageBus::new();
        let dom = MemoryDom::new(100.0)
            .with_slides(3, 100.0)
            .with_arrows()
            .with_indicator();
        let slider = Slider::mount(dom, &bus, Instant::now()).unwrap();
        let instance = slider.instance_id().to_string();

        slider.with_dom(|dom| {
            assert_eq!(dom.data(Part::Root, data::CORAL_SCROLL_ID), Some(instance));
            assert_eq!(dom.dot_count(), 3);
            assert_eq!(dom.active_dots(), vec![0]);
            assert_eq!(dom.active_slides(), vec![dom.slides()[0]]);
            assert!(dom.has_class(Part::PreviousArrow, classes::DISABLED));
        });
        assert_eq!(active_id(&slider).as_deref(), Some("slide-0"));
        assert_eq!(bus.subscriber_count(), 3);
    }

    #[test]
    fn test_finite_walkthrough_five_slides() {
        let bus = MessageBus::new();
        let (seen, _sub) = announcements(&bus);
        let dom = MemoryDom::new(100.0).with_slides(5, 100.0).with_arrows();
        let slider = Slider::with_config(dom, finite_config(), &bus, Instant::now()).unwrap();
        let now = Instant::now();

        slider.next(now);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-1"));
        slider.with_dom(|dom| {
            assert!(!dom.has_class(Part::PreviousArrow, classes::DISABLED));
            assert!(!dom.has_class(Part::NextArrow, classes::DISABLED));
        });

        for _ in 0..3 {
            slider.next(now);
        }
        assert_eq!(active_id(&slider).as_deref(), Some("slide-4"));
        slider.with_dom(|dom| {
            assert!(dom.has_class(Part::NextArrow, classes::DISABLED));
            assert!(!dom.has_class(Part::PreviousArrow, classes::DISABLED));
        });

        // Further steps are no-ops and announce nothing
        slider.next(now);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-4"));
        let positions: Vec<usize> = seen.borrow().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_infinite_wrap_from_last_slide() {
        let bus = MessageBus::new();
        let (seen, _sub) = announcements(&bus);
        let dom = MemoryDom::new(100.0).with_slides(3, 100.0);
        let slider = Slider::with_config(dom, infinite_config(), &bus, Instant::now()).unwrap();
        let now = Instant::now();

        // [C'] A B C [A']: start on A, then go to C
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 100.0);
        slider.navigate(NavRequest::TargetPosition(2), now);
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 300.0);
        slider.with_dom_mut(|dom| dom.clear_scroll_log());
        seen.borrow_mut().clear();

        slider.next(now);

        assert_eq!(
            slider.with_dom(|dom| dom.scroll_log().to_vec()),
            vec![
                ScrollCall {
                    offset: 0.0,
                    behavior: ScrollBehavior::Instant
                },
                ScrollCall {
                    offset: 100.0,
                    behavior: ScrollBehavior::Smooth
                },
            ]
        );
        assert_eq!(*seen.borrow(), vec![SlideRef::new("slide-0", 0)]);
    }

    #[test]
    fn test_infinite_cycle_announces_only_originals() {
        let bus = MessageBus::new();
        let (seen, _sub) = announcements(&bus);
        let dom = MemoryDom::new(100.0).with_slides(4, 100.0);
        let slider = Slider::with_config(dom, infinite_config(), &bus, Instant::now()).unwrap();
        let now = Instant::now();

        for _ in 0..10 {
            slider.next(now);
        }
        for _ in 0..5 {
            slider.previous(now);
        }

        let positions: Vec<usize> = seen.borrow().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 1, 0, 3, 2, 1]);
        assert!(seen.borrow().iter().all(|s| s.id.as_str().starts_with("slide-")));
    }

    #[test]
    fn test_group_stepping() {
        let bus = MessageBus::new();
        let dom = MemoryDom::new(100.0).with_slides(5, 100.0);
        let config = SliderConfig {
            slides_per_group: 2,
            ..SliderConfig::default()
        };
        let slider = Slider::with_config(dom, config, &bus, Instant::now()).unwrap();
        let now = Instant::now();

        slider.next(now);
        assert_eq!(slider.state().shadow_active_index, 2);
        slider.next(now);
        assert_eq!(slider.state().shadow_active_index, 4);
        slider.previous(now);
        assert_eq!(slider.state().shadow_active_index, 2);
    }

    #[test]
    fn test_start_position_lookup() {
        let bus = MessageBus::new();
        let now = Instant::now();

        let by_position = MemoryDom::new(100.0)
            .with_slides(4, 100.0)
            .with_root_data("startPositionId", "2");
        let slider = Slider::mount(by_position, &bus, now).unwrap();
        assert_eq!(active_id(&slider).as_deref(), Some("slide-2"));
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 200.0);

        let mut by_deeplink = MemoryDom::new(100.0)
            .with_slides(4, 100.0)
            .with_root_data("startPositionId", "pricing");
        let key = by_deeplink.slides()[3];
        by_deeplink.set_data(Part::Slide(key), data::DEEPLINK_TARGET, Some("pricing"));
        let slider = Slider::mount(by_deeplink, &bus, now).unwrap();
        assert_eq!(active_id(&slider).as_deref(), Some("slide-3"));

        let mut by_id = MemoryDom::new(100.0)
            .with_slides(4, 100.0)
            .with_root_data("startPositionId", "hero");
        let key = by_id.slides()[1];
        by_id.set_data(Part::Slide(key), data::SLIDE_ID, Some("hero"));
        let slider = Slider::mount(by_id, &bus, now).unwrap();
        assert_eq!(active_id(&slider).as_deref(), Some("hero"));

        let unknown = MemoryDom::new(100.0)
            .with_slides(2, 100.0)
            .with_root_data("startPositionId", "nowhere");
        let slider = Slider::mount(unknown, &bus, now).unwrap();
        assert_eq!(active_id(&slider).as_deref(), Some("slide-0"));
    }

    #[test]
    fn test_infinite_start_skips_leading_clones() {
        let bus = MessageBus::new();
        let dom = MemoryDom::new(100.0)
            .with_slides(5, 100.0)
            .with_root_data("infiniteScroll", "true")
            .with_root_data("group", "2");
        let slider = Slider::mount(dom, &bus, Instant::now()).unwrap();

        // One leading clone (the short last group)
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 100.0);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-0"));
    }

    #[test]
    fn test_request_addressed_by_selector() {
        let bus = MessageBus::new();
        let now = Instant::now();
        let follower = |class: &str| {
            let dom = MemoryDom::new(100.0)
                .with_slides(4, 100.0)
                .with_root_class(class)
                .with_root_data("isThumbsSlider", "true");
            Slider::mount(dom, &bus, now).unwrap()
        };
        let thumbs_a = follower("thumbs-a");
        let thumbs_b = follower("thumbs-b");

        let stranger = InstanceId::from_raw(0);
        coordinator::request_slide(&bus, "thumbs-a", SlideRef::new("slide-2", 2), stranger, now);

        assert_eq!(thumbs_a.state().shadow_active_index, 2);
        assert_eq!(thumbs_a.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 200.0);
        assert_eq!(thumbs_b.state().shadow_active_index, 0);
        assert_eq!(thumbs_b.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 0.0);
    }

    #[test]
    fn test_primary_and_thumbs_stay_in_sync() {
        let bus = MessageBus::new();
        let (seen, _sub) = announcements(&bus);
        let now = Instant::now();

        let primary = Slider::mount(
            MemoryDom::new(100.0)
                .with_slides(4, 100.0)
                .with_root_class("main-slider")
                .with_root_data("thumbs", "thumbs-a"),
            &bus,
            now,
        )
        .unwrap();

        // Thumbs carry their own ids: requests fall back to positions
        let mut thumbs_dom = MemoryDom::new(100.0)
            .with_slides(4, 100.0)
            .with_root_class("thumbs-a")
            .with_root_data("isThumbsSlider", "")
            .with_root_data("thumbsParentClass", "main-slider");
        for (i, key) in thumbs_dom.slides().into_iter().enumerate() {
            thumbs_dom.set_data(Part::Slide(key), data::SLIDE_ID, Some(&format!("thumb-{i}")));
        }
        let thumbs = Slider::mount(thumbs_dom, &bus, now).unwrap();
        let thumb_key = |i: usize| thumbs.with_dom(|dom| dom.slides()[i]);

        // Followers never present on their own
        assert!(thumbs.with_dom(|dom| dom.active_slides().is_empty()));
        assert_eq!(thumbs.state().active_slide_id, None);

        primary.next(now);
        assert_eq!(thumbs.state().shadow_active_index, 1);
        assert_eq!(thumbs.with_dom(|dom| dom.active_slides()), vec![thumb_key(1)]);

        // Clicking a thumb drives the primary, which drives the thumbs back
        thumbs.on_slide_click(&SlideId::from("thumb-3"), now);
        assert_eq!(active_id(&primary).as_deref(), Some("slide-3"));
        assert_eq!(thumbs.state().shadow_active_index, 3);
        assert_eq!(thumbs.with_dom(|dom| dom.active_slides()), vec![thumb_key(3)]);

        // Only the primary announces, once per change
        let ids: Vec<String> = seen.borrow().iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, vec!["slide-1", "slide-3"]);
    }

    #[test]
    fn test_follower_settle_keeps_shadow_position() {
        let bus = MessageBus::new();
        let now = Instant::now();
        let dom = MemoryDom::new(100.0)
            .with_slides(4, 100.0)
            .with_root_class("thumbs-a")
            .with_root_data("isThumbsSlider", "true");
        let slider = Slider::mount(dom, &bus, now).unwrap();

        let primary = InstanceId::from_raw(0);
        coordinator::request_slide(&bus, "thumbs-a", SlideRef::new("slide-3", 3), primary, now);
        assert_eq!(slider.state().shadow_active_index, 3);

        // The user scrolls the strip by hand; the marked thumb stays current
        slider.with_dom_mut(|dom| dom.scroll_to(Axis::Horizontal, 0.0, ScrollBehavior::Smooth));
        slider.on_scroll_end(now);
        slider.tick(now);
        assert_eq!(slider.state().shadow_active_index, 3);
        slider.with_dom(|dom| assert_eq!(dom.active_slides(), vec![dom.slides()[3]]));

        slider.previous(now);
        assert_eq!(slider.state().shadow_active_index, 2);
    }

    #[test]
    fn test_follower_settle_on_clone_only_redirects() {
        let bus = MessageBus::new();
        let now = Instant::now();
        let dom = MemoryDom::new(100.0)
            .with_slides(3, 100.0)
            .with_root_class("thumbs-a")
            .with_root_data("isThumbsSlider", "true")
            .with_root_data("infiniteScroll", "true");
        let slider = Slider::mount(dom, &bus, now).unwrap();

        // [C'] A B C [A']
        let primary = InstanceId::from_raw(0);
        coordinator::request_slide(&bus, "thumbs-a", SlideRef::new("slide-1", 1), primary, now);
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 200.0);

        slider.with_dom_mut(|dom| dom.scroll_to(Axis::Horizontal, 400.0, ScrollBehavior::Smooth));
        slider.on_scroll_end(now);
        slider.tick(now);
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 100.0);
        assert_eq!(slider.state().shadow_active_index, 1);
    }

    #[test]
    fn test_follower_steps_without_presentation() {
        let bus = MessageBus::new();
        let (seen, _sub) = announcements(&bus);
        let dom = MemoryDom::new(100.0).with_slides(3, 100.0).with_arrows();
        let config = SliderConfig {
            is_thumbs_slider: true,
            ..SliderConfig::default()
        };
        let slider = Slider::with_config(dom, config, &bus, Instant::now()).unwrap();

        slider.next(Instant::now());
        assert_eq!(slider.state().shadow_active_index, 1);
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 100.0);
        slider.with_dom(|dom| {
            assert_eq!(dom.class_mutations(), 0);
            assert!(dom.active_slides().is_empty());
        });
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_scroll_settle_redirects_clone_without_duplicate_announce() {
        let bus = MessageBus::new();
        let (seen, _sub) = announcements(&bus);
        let dom = MemoryDom::new(100.0).with_slides(3, 100.0);
        let slider = Slider::with_config(dom, infinite_config(), &bus, Instant::now()).unwrap();
        let t0 = Instant::now();

        // [C'] A B C [A']: the user drags from A back onto C'
        slider.with_dom_mut(|dom| dom.scroll_to(Axis::Horizontal, 0.0, ScrollBehavior::Smooth));
        slider.on_scroll_end(t0);
        slider.tick(t0);
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 300.0);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-2"));
        assert_eq!(seen.borrow().len(), 1);

        // Settling again on the original changes nothing
        slider.on_scroll_end(t0 + ms(10));
        slider.tick(t0 + ms(10));
        assert_eq!(seen.borrow().len(), 1);

        // Landing on A' while A was never left: redirect only, no announcement
        slider.navigate(NavRequest::TargetPosition(0), t0);
        seen.borrow_mut().clear();
        slider.with_dom_mut(|dom| dom.scroll_to(Axis::Horizontal, 400.0, ScrollBehavior::Smooth));
        slider.on_scroll_end(t0 + ms(20));
        slider.tick(t0 + ms(20));
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 100.0);
        assert!(seen.borrow().is_empty());
        slider.with_dom(|dom| assert_eq!(dom.active_slides(), vec![dom.slides()[1]]));
    }

    #[test]
    fn test_scroll_settle_presents_user_scroll() {
        let bus = MessageBus::new();
        let (seen, _sub) = announcements(&bus);
        let dom = MemoryDom::new(100.0).with_slides(4, 100.0).with_indicator();
        let slider = Slider::with_config(dom, finite_config(), &bus, Instant::now()).unwrap();
        let t0 = Instant::now();

        slider.with_dom_mut(|dom| dom.scroll_to(Axis::Horizontal, 210.0, ScrollBehavior::Smooth));
        slider.on_scroll_end(t0);
        assert!(seen.borrow().is_empty(), "settle waits for the next tick");
        slider.tick(t0);

        assert_eq!(active_id(&slider).as_deref(), Some("slide-2"));
        slider.with_dom(|dom| assert_eq!(dom.active_dots(), vec![2]));
        assert_eq!(*seen.borrow(), vec![SlideRef::new("slide-2", 2)]);
    }

    #[test]
    fn test_drag_steps_once_per_gesture_burst() {
        let bus = MessageBus::new();
        let dom = MemoryDom::new(100.0).with_slides(5, 100.0).with_grab_overlay();
        let slider = Slider::with_config(dom, finite_config(), &bus, Instant::now()).unwrap();
        let t0 = Instant::now();

        slider.on_pointer_down(500.0, t0);
        slider.with_dom(|dom| {
            assert!(dom.has_class(Part::GrabOverlay, classes::ACTIVE));
            assert!(dom.has_class(Part::Track, classes::ACTIVE));
        });
        assert!(slider.state().is_dragging);

        slider.on_pointer_move(380.0, t0 + ms(10));
        slider.on_pointer_move(300.0, t0 + ms(20));
        slider.tick(t0 + ms(100));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-0"));
        slider.tick(t0 + ms(120));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-1"));

        slider.on_pointer_up(t0 + ms(130));
        slider.with_dom(|dom| assert!(!dom.has_class(Part::GrabOverlay, classes::ACTIVE)));
        slider.tick(t0 + ms(1120));
        slider.with_dom(|dom| assert!(dom.has_class(Part::Track, classes::ACTIVE)));
        slider.tick(t0 + ms(1130));
        slider.with_dom(|dom| assert!(!dom.has_class(Part::Track, classes::ACTIVE)));
    }

    #[test]
    fn test_drag_requires_overlay() {
        let bus = MessageBus::new();
        let dom = MemoryDom::new(100.0).with_slides(3, 100.0);
        let slider = Slider::with_config(dom, finite_config(), &bus, Instant::now()).unwrap();
        let t0 = Instant::now();

        slider.on_pointer_down(500.0, t0);
        slider.on_pointer_move(100.0, t0);
        slider.tick(t0 + ms(200));
        assert!(!slider.state().is_dragging);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-0"));
    }

    #[test]
    fn test_autoplay_pause_and_resume() {
        let bus = MessageBus::new();
        let t0 = Instant::now();
        let dom = MemoryDom::new(100.0)
            .with_slides(4, 100.0)
            .with_root_data("autoScroll", "1000");
        let slider = Slider::mount(dom, &bus, t0).unwrap();
        let animation = |slider: &Slider<MemoryDom>| {
            slider.with_dom(|dom| dom.root_style(ANIMATION_STATE_PROPERTY).map(str::to_string))
        };
        assert_eq!(animation(&slider).as_deref(), Some("running"));

        // interval at 1000, fire debounce at 1100
        tick_range(&slider, t0, 0, 1090);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-0"));
        slider.tick(t0 + ms(1100));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-1"));

        slider.on_pointer_enter(t0 + ms(1150));
        assert_eq!(animation(&slider).as_deref(), Some("paused"));
        assert!(slider.state().is_autoplay_paused);
        tick_range(&slider, t0, 1150, 4000);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-1"));

        // restart 4100, interval 5100, fire 5200
        slider.on_pointer_leave(t0 + ms(4000));
        assert_eq!(animation(&slider).as_deref(), Some("running"));
        tick_range(&slider, t0, 4000, 5190);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-1"));
        slider.tick(t0 + ms(5200));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-2"));
    }

    #[test]
    fn test_own_announcement_holds_autoplay() {
        let bus = MessageBus::new();
        let t0 = Instant::now();
        let config = SliderConfig {
            auto_scroll_interval_ms: Some(1000),
            ..SliderConfig::default()
        };
        let dom = MemoryDom::new(100.0).with_slides(4, 100.0);
        let slider = Slider::with_config(dom, config, &bus, t0).unwrap();

        // A manual step at 900 pushes the next autoplay step out to 900 + 100 + 1000 + 100
        slider.next(t0 + ms(900));
        tick_range(&slider, t0, 900, 2090);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-1"));
        slider.tick(t0 + ms(2100));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-2"));
    }

    #[test]
    fn test_content_change_rebuilds_debounced() {
        let bus = MessageBus::new();
        let dom = MemoryDom::new(100.0)
            .with_slides(3, 100.0)
            .with_indicator();
        let slider = Slider::with_config(dom, infinite_config(), &bus, Instant::now()).unwrap();
        let t0 = Instant::now();

        slider.with_dom_mut(|dom| {
            dom.add_slide(100.0);
        });
        slider.on_content_changed(t0);
        slider.on_content_changed(t0 + ms(5));
        slider.tick(t0 + ms(10));
        assert_eq!(slider.with_dom(|dom| dom.dot_count()), 3);

        slider.tick(t0 + ms(15));
        slider.with_dom(|dom| {
            assert_eq!(dom.dot_count(), 4);
            assert!(!dom.has_class(Part::Track, classes::UPDATING_SLIDES));
            assert_eq!(dom.active_dots(), vec![0]);
            let set = SlideSet::scan(dom);
            assert_eq!(set.original_count(), 4);
            assert_eq!(set.len(), 6);
            // Still looking at A, past the leading clone
            assert_eq!(dom.scroll_offset(Axis::Horizontal), 100.0);
        });
    }

    #[test]
    fn test_update_request_addressed_by_instance() {
        let bus = MessageBus::new();
        let now = Instant::now();
        let slider = Slider::with_config(
            MemoryDom::new(100.0).with_slides(2, 100.0).with_indicator(),
            finite_config(),
            &bus,
            now,
        )
        .unwrap();
        slider.with_dom_mut(|dom| {
            dom.add_slide(100.0);
        });

        coordinator::request_update(&bus, InstanceId::from_raw(u64::MAX), now);
        assert_eq!(slider.with_dom(|dom| dom.dot_count()), 2);

        coordinator::request_update(&bus, slider.instance_id(), now);
        assert_eq!(slider.with_dom(|dom| dom.dot_count()), 3);
    }

    #[test]
    fn test_keyboard_follows_axis() {
        let bus = MessageBus::new();
        let now = Instant::now();
        let dom = MemoryDom::new(100.0).with_slides(4, 100.0);
        let slider = Slider::with_config(dom, finite_config(), &bus, now).unwrap();

        assert!(slider.on_key(NavKey::ArrowRight, now));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-1"));
        assert!(!slider.on_key(NavKey::ArrowDown, now));
        assert!(slider.on_key(NavKey::End, now));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-3"));
        assert!(slider.on_key(NavKey::ArrowLeft, now));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-2"));
        assert!(slider.on_key(NavKey::Home, now));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-0"));

        let vertical = MemoryDom::new(100.0)
            .with_axis(Axis::Vertical)
            .with_slides(3, 100.0)
            .with_root_data("axis", "vertical");
        let slider = Slider::mount(vertical, &bus, now).unwrap();
        assert!(slider.on_key(NavKey::ArrowDown, now));
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Vertical)), 100.0);
        assert!(!slider.on_key(NavKey::ArrowRight, now));
    }

    #[test]
    fn test_dot_click_navigates() {
        let bus = MessageBus::new();
        let now = Instant::now();
        let dom = MemoryDom::new(100.0).with_slides(4, 100.0).with_indicator();
        let slider = Slider::with_config(dom, finite_config(), &bus, now).unwrap();

        slider.on_dot_click(3, now);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-3"));
        slider.with_dom(|dom| assert_eq!(dom.active_dots(), vec![3]));

        assert!(!slider.navigate(NavRequest::TargetPosition(10), now));
    }

    #[test]
    fn test_navigate_reports_boundary_clamps() {
        let bus = MessageBus::new();
        let now = Instant::now();
        let dom = MemoryDom::new(100.0).with_slides(2, 100.0).with_arrows();
        let slider = Slider::with_config(dom, finite_config(), &bus, now).unwrap();

        assert!(!slider.navigate(NavRequest::previous(), now));
        assert!(slider.navigate(NavRequest::next(), now));
        assert_eq!(active_id(&slider).as_deref(), Some("slide-1"));
        assert!(!slider.navigate(NavRequest::next(), now));
        assert!(!slider.navigate(NavRequest::TargetPosition(1), now));
        assert!(slider.navigate(NavRequest::TargetPosition(0), now));
    }

    #[test]
    fn test_dispose_releases_everything() {
        let bus = MessageBus::new();
        let now = Instant::now();
        let dom = MemoryDom::new(100.0)
            .with_slides(3, 100.0)
            .with_root_class("thumbs-a")
            .with_root_data("autoScroll", "500");
        let mut slider = Slider::mount(dom, &bus, now).unwrap();
        assert_eq!(bus.subscriber_count(), 3);

        slider.dispose();
        assert!(slider.is_disposed());
        assert_eq!(bus.subscriber_count(), 0);

        // Nothing moves any more: not autoplay, not requests, not direct calls
        tick_range(&slider, now, 0, 2000);
        let stranger = InstanceId::from_raw(0);
        coordinator::request_slide(&bus, "thumbs-a", SlideRef::new("slide-2", 2), stranger, now);
        slider.next(now);
        assert_eq!(active_id(&slider).as_deref(), Some("slide-0"));
        assert_eq!(slider.with_dom(|dom| dom.scroll_offset(Axis::Horizontal)), 0.0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = MessageBus::new();
        {
            let _slider = Slider::mount(
                MemoryDom::new(100.0).with_slides(2, 100.0),
                &bus,
                Instant::now(),
            )
            .unwrap();
            assert_eq!(bus.subscriber_count(), 3);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_empty_slider_is_inert() {
        let bus = MessageBus::new();
        let now = Instant::now();
        let dom = MemoryDom::new(100.0).with_arrows().with_indicator();
        let slider = Slider::with_config(dom, infinite_config(), &bus, now).unwrap();

        assert!(!slider.navigate(NavRequest::next(), now));
        slider.on_scroll_end(now);
        slider.tick(now);
        assert_eq!(slider.state().active_slide_id, None);
        slider.with_dom(|dom| assert_eq!(dom.class_mutations(), 0));
    }
}
