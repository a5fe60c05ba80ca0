//! Layout value types
//!
//! Everything the slider measures is projected onto one axis. `Axis` does the
//! projection so geometry code never branches on horizontal/vertical itself.

use serde::{Deserialize, Serialize};

/// Scroll direction of the slide track
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Leading edge of a rect along this axis
    pub fn start(self, rect: &Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.x,
            Axis::Vertical => rect.y,
        }
    }

    /// Extent of a rect along this axis
    pub fn extent(self, rect: &Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.width,
            Axis::Vertical => rect.height,
        }
    }

    /// Trailing edge of a rect along this axis
    pub fn end(self, rect: &Rect) -> f32 {
        self.start(rect) + self.extent(rect)
    }
}

/// Scroll-snap alignment of the slides (`scroll-snap-align`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapAlignment {
    Start,
    Center,
    End,
}

impl SnapAlignment {
    /// Parse a computed `scroll-snap-align` value
    ///
    /// Two-value forms (`"center start"`) use the first keyword. `none` and
    /// unknown keywords yield `None`.
    pub fn from_css(value: &str) -> Option<Self> {
        match value.split_whitespace().next()? {
            "start" => Some(SnapAlignment::Start),
            "center" => Some(SnapAlignment::Center),
            "end" => Some(SnapAlignment::End),
            _ => None,
        }
    }
}

/// Axis-aligned rectangle in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// How a scroll request should move the track
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Jump without animation
    Instant,
    /// Host platform smooth scroll (fire-and-forget)
    Smooth,
}
