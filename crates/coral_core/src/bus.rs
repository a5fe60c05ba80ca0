//! Document-level message bus
//!
//! Independent slider instances coordinate through broadcasts instead of
//! holding references to each other. The bus is injectable so an instance can
//! be driven in isolation, and every subscription is an owned handle that
//! unregisters itself when released.
//!
//! # Delivery
//!
//! ```text
//! publish(e1)
//!     ├─ handler A(e1) ── publish(e2) ──► queued
//!     ├─ handler B(e1)
//!     └─ handler A(e2), handler B(e2)   (still inside the first publish)
//! ```
//!
//! Handlers run synchronously in registration order. A publish issued from
//! inside a handler is queued and delivered once the current round finishes,
//! so no handler is ever re-entered.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Instant;
//! use coral_core::bus::{MessageBus, UpdateRequest};
//! use coral_core::ids::InstanceId;
//!
//! let bus = MessageBus::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let counter = seen.clone();
//! let subscription = bus.subscribe::<UpdateRequest>(move |_, _| counter.set(counter.get() + 1));
//!
//! bus.publish(UpdateRequest { instance: InstanceId::from_raw(7) }, Instant::now());
//! assert_eq!(seen.get(), 1);
//!
//! subscription.unsubscribe();
//! bus.publish(UpdateRequest { instance: InstanceId::from_raw(7) }, Instant::now());
//! assert_eq!(seen.get(), 1);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Instant;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoralError, Result};
use crate::ids::{InstanceId, SlideRef};

/// Event names on the document bus
pub mod event_names {
    pub const REQUEST_TO_SLIDE: &str = "request-to-slide";
    pub const SCROLLED_TO_SLIDE: &str = "scrolled-to-slide";
    pub const UPDATE_CORAL_SCROLL: &str = "update-coral-scroll";
}

/// Ask the instances whose root matches `target_selector` to navigate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestToSlide {
    pub target: SlideRef,
    pub target_selector: String,
    pub origin: InstanceId,
}

/// A slider finished a navigation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrolledToSlide {
    pub active: SlideRef,
    pub origin: InstanceId,
}

/// Ask one instance to re-scan its slide set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub instance: InstanceId,
}

/// Every message that travels over the bus
#[derive(Clone, Debug, PartialEq)]
pub enum BusEvent {
    RequestToSlide(RequestToSlide),
    ScrolledToSlide(ScrolledToSlide),
    UpdateRequest(UpdateRequest),
}

impl BusEvent {
    /// The document event name
    pub fn name(&self) -> &'static str {
        match self {
            BusEvent::RequestToSlide(_) => event_names::REQUEST_TO_SLIDE,
            BusEvent::ScrolledToSlide(_) => event_names::SCROLLED_TO_SLIDE,
            BusEvent::UpdateRequest(_) => event_names::UPDATE_CORAL_SCROLL,
        }
    }

    /// Serialize the payload as a `CustomEvent` detail
    pub fn to_detail_json(&self) -> Result<String> {
        let json = match self {
            BusEvent::RequestToSlide(msg) => serde_json::to_string(msg)?,
            BusEvent::ScrolledToSlide(msg) => serde_json::to_string(msg)?,
            BusEvent::UpdateRequest(msg) => serde_json::to_string(msg)?,
        };
        Ok(json)
    }

    /// Rebuild an event from a document event name and its JSON detail
    pub fn from_detail_json(name: &str, detail: &str) -> Result<Self> {
        match name {
            event_names::REQUEST_TO_SLIDE => {
                Ok(BusEvent::RequestToSlide(serde_json::from_str(detail)?))
            }
            event_names::SCROLLED_TO_SLIDE => {
                Ok(BusEvent::ScrolledToSlide(serde_json::from_str(detail)?))
            }
            event_names::UPDATE_CORAL_SCROLL => {
                Ok(BusEvent::UpdateRequest(serde_json::from_str(detail)?))
            }
            other => Err(CoralError::UnknownEvent(other.to_string())),
        }
    }
}

/// A payload type that can be subscribed to individually
pub trait Message: Sized + 'static {
    fn from_event(event: &BusEvent) -> Option<&Self>;
    fn into_event(self) -> BusEvent;
}

macro_rules! impl_message {
    ($ty:ident) => {
        impl Message for $ty {
            fn from_event(event: &BusEvent) -> Option<&Self> {
                match event {
                    BusEvent::$ty(msg) => Some(msg),
                    _ => None,
                }
            }

            fn into_event(self) -> BusEvent {
                BusEvent::$ty(self)
            }
        }

        impl From<$ty> for BusEvent {
            fn from(msg: $ty) -> Self {
                BusEvent::$ty(msg)
            }
        }
    };
}

impl_message!(RequestToSlide);
impl_message!(ScrolledToSlide);
impl_message!(UpdateRequest);

/// Unique identifier for a subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&BusEvent, Instant)>;

#[derive(Default)]
struct BusInner {
    handlers: IndexMap<SubscriptionId, Handler>,
    next_id: u64,
    queue: VecDeque<(BusEvent, Instant)>,
    dispatching: bool,
}

/// Shared publish/subscribe medium (cheap to clone)
#[derive(Clone, Default)]
pub struct MessageBus {
    inner: Rc<RefCell<BusInner>>,
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MessageBus")
            .field("subscribers", &inner.handlers.len())
            .field("queued", &inner.queue.len())
            .field("dispatching", &inner.dispatching)
            .finish()
    }
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-owning handle, for handlers that need to publish
    pub fn downgrade(&self) -> WeakBus {
        WeakBus {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Register a typed handler
    ///
    /// The handler stays registered until the returned `Subscription` is
    /// unsubscribed or dropped.
    pub fn subscribe<M: Message>(&self, handler: impl Fn(&M, Instant) + 'static) -> Subscription {
        let erased: Handler = Rc::new(move |event: &BusEvent, now: Instant| {
            if let Some(msg) = M::from_event(event) {
                handler(msg, now);
            }
        });

        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.handlers.insert(id, erased);
        tracing::trace!(subscription = id.0, "bus: subscribed");

        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Deliver `event` to every registered handler
    pub fn publish(&self, event: impl Into<BusEvent>, now: Instant) {
        let event = event.into();
        {
            let mut inner = self.inner.borrow_mut();
            tracing::trace!(event = event.name(), nested = inner.dispatching, "bus: publish");
            inner.queue.push_back((event, now));
            if inner.dispatching {
                return;
            }
            inner.dispatching = true;
        }

        let _guard = DispatchGuard { inner: &self.inner };

        loop {
            let next = self.inner.borrow_mut().queue.pop_front();
            let Some((event, at)) = next else {
                break;
            };

            // Snapshot so handlers may (un)subscribe while we iterate
            let round: Vec<(SubscriptionId, Handler)> = self
                .inner
                .borrow()
                .handlers
                .iter()
                .map(|(id, handler)| (*id, Rc::clone(handler)))
                .collect();

            for (id, handler) in round {
                if !self.inner.borrow().handlers.contains_key(&id) {
                    continue;
                }
                handler(&event, at);
            }
        }
    }

    /// Publish a batch in order
    pub fn publish_all(&self, events: impl IntoIterator<Item = BusEvent>, now: Instant) {
        for event in events {
            self.publish(event, now);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

/// Clears the dispatching flag even if a handler panics
struct DispatchGuard<'a> {
    inner: &'a Rc<RefCell<BusInner>>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.dispatching = false;
            inner.queue.clear();
        }
    }
}

/// Weak reference to a bus
#[derive(Clone)]
pub struct WeakBus {
    inner: Weak<RefCell<BusInner>>,
}

impl WeakBus {
    pub fn upgrade(&self) -> Option<MessageBus> {
        self.inner.upgrade().map(|inner| MessageBus { inner })
    }
}

/// Handle for unsubscribing from the bus
///
/// Dropping the handle unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    bus: Weak<RefCell<BusInner>>,
    active: bool,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(bus) = self.bus.upgrade() {
            if let Ok(mut inner) = bus.try_borrow_mut() {
                inner.handlers.shift_remove(&self.id);
                tracing::trace!(subscription = self.id.0, "bus: unsubscribed");
            } else {
                tracing::warn!(subscription = self.id.0, "bus busy, subscription leaked");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
