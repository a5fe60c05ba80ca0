//! Coral Scroll
//!
//! Carousel engine for scroll-snap sliders, driven against an abstract DOM.
//!
//! # Features
//!
//! - **Geometry**: active slide and end-of-track detection from measured layout
//! - **Infinite Mode**: clone groups on both ends with invisible wrap-around jumps
//! - **Navigation**: pure request resolution, group stepping, id and position targets
//! - **Thumbs Sync**: primary and follower sliders coordinated over a message bus
//! - **Interaction**: drag-to-step, autoplay with pause on hover, keyboard, dots
//! - **Headless**: [`memory::MemoryDom`] lays out slides in memory for tests and tools
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use coral_core::bus::{MessageBus, ScrolledToSlide};
//! use coral_scroll::{MemoryDom, Slider};
//!
//! let bus = MessageBus::new();
//! let _log = bus.subscribe::<ScrolledToSlide>(|msg, _| println!("now at {}", msg.active.id));
//!
//! let dom = MemoryDom::new(300.0)
//!     .with_slides(6, 300.0)
//!     .with_root_data("infiniteScroll", "true");
//! let slider = Slider::mount(dom, &bus, Instant::now()).unwrap();
//!
//! slider.previous(Instant::now());
//! assert_eq!(slider.state().shadow_active_index, 5);
//! ```

pub mod autoplay;
pub mod clones;
pub mod coordinator;
pub mod dom;
pub mod drag;
pub mod geometry;
pub mod memory;
pub mod navigation;
pub mod presentation;
pub mod settle;
pub mod slider;
pub mod slides;

pub use autoplay::{AnimationState, Autoplay};
pub use clones::{ensure_clones, CloneOutcome};
pub use dom::{DomSurface, ElementKey, InsertAt, Part, RootAttributes, TrackLayout};
pub use drag::DragTracker;
pub use geometry::{read_state, SliderSnapshot};
pub use memory::MemoryDom;
pub use navigation::{resolve, Cursor, Direction, NavRequest, Resolution, ResolvedSlide, ScrollMove};
pub use settle::{ScrollSettle, SettleOutcome};
pub use slider::{NavKey, NavigationState, Slider};
pub use slides::{assign_slide_ids, SlideEntry, SlideSet};
