//! Coral Core
//!
//! Host-agnostic building blocks for the Coral slider:
//!
//! - **Identifiers**: stable slide ids and per-instance tags
//! - **Layout values**: axis projection, snap alignment, rects
//! - **Message bus**: injectable publish/subscribe with owned subscriptions
//! - **Timers**: tick-driven debouncers and intervals
//! - **Configuration**: `SliderConfig` read once from host attributes
//!
//! # Example
//!
//! ```rust
//! use coral_core::config::SliderConfig;
//!
//! let attrs = [("infiniteScroll", "true"), ("group", "2")];
//! let config = SliderConfig::from_attributes(&attrs, None);
//!
//! assert!(config.infinite);
//! assert_eq!(config.slides_per_group, 2);
//! assert_eq!(config.grab_velocity, 100.0);
//! ```

pub mod bus;
pub mod config;
pub mod error;
pub mod ids;
pub mod layout;
pub mod timer;

pub use bus::{
    BusEvent, Message, MessageBus, RequestToSlide, ScrolledToSlide, Subscription, UpdateRequest,
    WeakBus,
};
pub use config::{AttributeSource, SliderConfig};
pub use error::{ConfigError, CoralError, Result};
pub use ids::{InstanceId, SlideId, SlideRef};
pub use layout::{Axis, Rect, ScrollBehavior, SnapAlignment};
pub use timer::{Debouncer, Interval};
