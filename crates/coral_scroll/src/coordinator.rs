//! Cross-instance coordination over the message bus
//!
//! Sliders never call each other. A primary and its thumbs strip exchange
//! three messages:
//!
//! | Message           | Addressed by            | Effect                           |
//! |-------------------|-------------------------|----------------------------------|
//! | `RequestToSlide`  | root class selector     | receiver navigates to the slide  |
//! | `ScrolledToSlide` | nobody (broadcast)      | origin pauses its own autoplay   |
//! | `UpdateRequest`   | instance id             | receiver re-scans its slides     |
//!
//! Feedback loops are cut by construction: a thumbs follower never
//! announces, and a primary only addresses its thumbs selector.
//!
//! Inside a slider, outgoing messages are collected in an [`Outbox`] while
//! its state is borrowed and published once the borrow is released.

use std::time::Instant;

use coral_core::bus::{BusEvent, MessageBus, RequestToSlide, ScrolledToSlide, UpdateRequest};
use coral_core::ids::{InstanceId, SlideRef};

use crate::dom::DomSurface;

/// Ask the sliders whose root matches `target_selector` to navigate
pub fn request_slide(
    bus: &MessageBus,
    target_selector: &str,
    target: SlideRef,
    origin: InstanceId,
    now: Instant,
) {
    bus.publish(
        RequestToSlide {
            target,
            target_selector: target_selector.to_string(),
            origin,
        },
        now,
    );
}

/// Broadcast that `origin` finished navigating to `active`
pub fn announce_slide_changed(bus: &MessageBus, active: SlideRef, origin: InstanceId, now: Instant) {
    bus.publish(ScrolledToSlide { active, origin }, now);
}

/// Ask one instance to re-scan its slides after an out-of-band change
pub fn request_update(bus: &MessageBus, instance: InstanceId, now: Instant) {
    bus.publish(UpdateRequest { instance }, now);
}

/// Whether a request is addressed to the slider rendered on `dom`
pub fn is_addressed<D: DomSurface + ?Sized>(dom: &D, request: &RequestToSlide) -> bool {
    dom.root_matches(&request.target_selector)
}

/// Messages a slider produced while its state was borrowed
#[derive(Debug)]
pub struct Outbox {
    origin: InstanceId,
    events: Vec<BusEvent>,
}

impl Outbox {
    pub fn new(origin: InstanceId) -> Self {
        Self {
            origin,
            events: Vec::new(),
        }
    }

    pub fn request_slide(&mut self, target_selector: &str, target: SlideRef) {
        self.events.push(BusEvent::RequestToSlide(RequestToSlide {
            target,
            target_selector: target_selector.to_string(),
            origin: self.origin,
        }));
    }

    pub fn announce_slide_changed(&mut self, active: SlideRef) {
        self.events.push(BusEvent::ScrolledToSlide(ScrolledToSlide {
            active,
            origin: self.origin,
        }));
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn take(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
