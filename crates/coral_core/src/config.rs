//! Slider configuration
//!
//! The host element's `data-*` attributes are read exactly once, at
//! construction, into an immutable [`SliderConfig`]. Every option and its
//! coercion rule lives here; nothing downstream re-reads attributes.
//!
//! | Attribute            | Field                    | Default    |
//! |----------------------|--------------------------|------------|
//! | `devMode`            | `dev_mode`               | `false`    |
//! | `grabVelocity`       | `grab_velocity`          | `100`      |
//! | `autoScroll`         | `auto_scroll_interval_ms`| disabled   |
//! | `thumbs`             | `thumbs_target_selector` | none       |
//! | `isThumbsSlider`     | `is_thumbs_slider`       | `false`    |
//! | `thumbsParentClass`  | `thumbs_parent_selector` | none       |
//! | `infiniteScroll`     | `infinite`               | `false`    |
//! | `startPositionId`    | `start_slide_id`         | none       |
//! | `slidesPerGroup`/`group` | `slides_per_group`   | `1`        |
//! | `axis`               | `axis`                   | horizontal |
//! | `lastSlideTolerance` | `last_slide_tolerance`   | `10`       |
//!
//! `snap_alignment` is not an attribute: it comes from the computed
//! `scroll-snap-align` of the first visible slide.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::{Axis, SnapAlignment};

/// Attribute names (dataset keys) on the host element
pub mod attributes {
    pub const DEV_MODE: &str = "devMode";
    pub const GRAB_VELOCITY: &str = "grabVelocity";
    pub const AUTO_SCROLL: &str = "autoScroll";
    pub const THUMBS: &str = "thumbs";
    pub const IS_THUMBS_SLIDER: &str = "isThumbsSlider";
    pub const THUMBS_PARENT_CLASS: &str = "thumbsParentClass";
    pub const INFINITE_SCROLL: &str = "infiniteScroll";
    pub const START_POSITION_ID: &str = "startPositionId";
    pub const SLIDES_PER_GROUP: &str = "slidesPerGroup";
    pub const GROUP: &str = "group";
    pub const AXIS: &str = "axis";
    pub const LAST_SLIDE_TOLERANCE: &str = "lastSlideTolerance";
}

/// Read access to the host element's dataset
pub trait AttributeSource {
    fn data(&self, name: &str) -> Option<String>;
}

impl<S: BuildHasher> AttributeSource for HashMap<String, String, S> {
    fn data(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl AttributeSource for [(&str, &str)] {
    fn data(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

impl<const N: usize> AttributeSource for [(&str, &str); N] {
    fn data(&self, name: &str) -> Option<String> {
        self.as_slice().data(name)
    }
}

/// Immutable-after-init slider options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderConfig {
    /// Dump geometry snapshots to the log
    pub dev_mode: bool,
    /// Drag distance that triggers one navigation step
    pub grab_velocity: f32,
    /// Autoplay period; `None` disables autoplay
    pub auto_scroll_interval_ms: Option<u64>,
    /// Selector of the thumbs slider this primary drives
    pub thumbs_target_selector: Option<String>,
    /// This instance mirrors a primary instead of driving navigation
    pub is_thumbs_slider: bool,
    /// Selector of the primary a thumbs follower addresses
    pub thumbs_parent_selector: Option<String>,
    /// Loop past the ends using boundary clones
    pub infinite: bool,
    /// Computed snap alignment of the slides
    pub snap_alignment: Option<SnapAlignment>,
    /// Initial active slide (id, deeplink target, or position)
    pub start_slide_id: Option<String>,
    /// Slides advanced per navigation step (>= 1)
    pub slides_per_group: usize,
    pub axis: Axis,
    /// Sub-pixel slack when testing whether the track is scrolled to its end
    pub last_slide_tolerance: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            grab_velocity: 100.0,
            auto_scroll_interval_ms: None,
            thumbs_target_selector: None,
            is_thumbs_slider: false,
            thumbs_parent_selector: None,
            infinite: false,
            snap_alignment: None,
            start_slide_id: None,
            slides_per_group: 1,
            axis: Axis::Horizontal,
            last_slide_tolerance: 10.0,
        }
    }
}

impl SliderConfig {
    /// Strict constructor: the first malformed attribute is an error
    pub fn parse<A>(attrs: &A, snap_alignment: Option<SnapAlignment>) -> Result<Self, ConfigError>
    where
        A: AttributeSource + ?Sized,
    {
        Self::build(attrs, snap_alignment, Err)
    }

    /// Lenient constructor: malformed attributes fall back to their default
    pub fn from_attributes<A>(attrs: &A, snap_alignment: Option<SnapAlignment>) -> Self
    where
        A: AttributeSource + ?Sized,
    {
        let lenient = |err: ConfigError| {
            tracing::debug!(%err, "ignoring malformed slider attribute");
            Ok(())
        };
        match Self::build(attrs, snap_alignment, lenient) {
            Ok(config) => config,
            Err(_) => Self {
                snap_alignment,
                ..Self::default()
            },
        }
    }

    pub fn auto_scroll_interval(&self) -> Option<Duration> {
        self.auto_scroll_interval_ms.map(Duration::from_millis)
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.auto_scroll_interval_ms.is_some() && !self.is_thumbs_slider
    }

    fn build<A, E>(
        attrs: &A,
        snap_alignment: Option<SnapAlignment>,
        mut on_error: E,
    ) -> Result<Self, ConfigError>
    where
        A: AttributeSource + ?Sized,
        E: FnMut(ConfigError) -> Result<(), ConfigError>,
    {
        use self::attributes::*;

        let defaults = Self::default();
        let policy = &mut on_error;

        let dev_mode = read(attrs, DEV_MODE, parse_bool, policy)?;
        let grab_velocity = read(attrs, GRAB_VELOCITY, parse_positive, policy)?;
        let auto_scroll = read(attrs, AUTO_SCROLL, parse_interval, policy)?;
        let thumbs = read(attrs, THUMBS, parse_selector, policy)?;
        let is_thumbs = read(attrs, IS_THUMBS_SLIDER, parse_bool, policy)?;
        let parent = read(attrs, THUMBS_PARENT_CLASS, parse_selector, policy)?;
        let infinite = read(attrs, INFINITE_SCROLL, parse_bool, policy)?;
        let start = read(attrs, START_POSITION_ID, parse_selector, policy)?;
        let group = match read(attrs, SLIDES_PER_GROUP, parse_group, policy)? {
            Some(group) => Some(group),
            None => read(attrs, GROUP, parse_group, policy)?,
        };
        let axis = read(attrs, AXIS, parse_axis, policy)?;
        let tolerance = read(attrs, LAST_SLIDE_TOLERANCE, parse_non_negative, policy)?;

        Ok(Self {
            dev_mode: dev_mode.unwrap_or(defaults.dev_mode),
            grab_velocity: grab_velocity.unwrap_or(defaults.grab_velocity),
            auto_scroll_interval_ms: auto_scroll.unwrap_or(defaults.auto_scroll_interval_ms),
            thumbs_target_selector: thumbs.flatten(),
            is_thumbs_slider: is_thumbs.unwrap_or(defaults.is_thumbs_slider),
            thumbs_parent_selector: parent.flatten(),
            infinite: infinite.unwrap_or(defaults.infinite),
            snap_alignment,
            start_slide_id: start.flatten(),
            slides_per_group: group.unwrap_or(defaults.slides_per_group),
            axis: axis.unwrap_or(defaults.axis),
            last_slide_tolerance: tolerance.unwrap_or(defaults.last_slide_tolerance),
        })
    }
}

/// Coerce one attribute
///
/// `Ok(None)` when the attribute is absent, or when it is malformed and
/// `on_error` chose to skip it.
fn read<A, T, E>(
    attrs: &A,
    name: &'static str,
    parse: fn(&'static str, &str) -> Result<T, ConfigError>,
    on_error: &mut E,
) -> Result<Option<T>, ConfigError>
where
    A: AttributeSource + ?Sized,
    E: FnMut(ConfigError) -> Result<(), ConfigError>,
{
    let Some(raw) = attrs.data(name) else {
        return Ok(None);
    };
    match parse(name, raw.trim()) {
        Ok(value) => Ok(Some(value)),
        Err(err) => on_error(err).map(|_| None),
    }
}

fn out_of_range(name: &'static str, raw: &str) -> ConfigError {
    ConfigError::OutOfRange {
        name,
        value: raw.to_string(),
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        // A bare attribute (`data-is-thumbs-slider`) reads as an empty string
        "" | "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: raw.to_string(),
        }),
    }
}

fn parse_number(name: &'static str, raw: &str) -> Result<f32, ConfigError> {
    let value: f32 = raw.parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(out_of_range(name, raw));
    }
    Ok(value)
}

fn parse_positive(name: &'static str, raw: &str) -> Result<f32, ConfigError> {
    let value = parse_number(name, raw)?;
    if value <= 0.0 {
        return Err(out_of_range(name, raw));
    }
    Ok(value)
}

fn parse_non_negative(name: &'static str, raw: &str) -> Result<f32, ConfigError> {
    let value = parse_number(name, raw)?;
    if value < 0.0 {
        return Err(out_of_range(name, raw));
    }
    Ok(value)
}

/// Autoplay period in ms; `None` switches autoplay off
fn parse_interval(name: &'static str, raw: &str) -> Result<Option<u64>, ConfigError> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("false") {
        return Ok(None);
    }
    let millis = parse_non_negative(name, raw)?.round() as u64;
    Ok((millis > 0).then_some(millis))
}

fn parse_group(name: &'static str, raw: &str) -> Result<usize, ConfigError> {
    let value: i64 = raw.parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })?;
    usize::try_from(value)
        .ok()
        .filter(|group| *group >= 1)
        .ok_or_else(|| out_of_range(name, raw))
}

fn parse_selector(_name: &'static str, raw: &str) -> Result<Option<String>, ConfigError> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("false") {
        return Ok(None);
    }
    Ok(Some(raw.to_string()))
}

fn parse_axis(name: &'static str, raw: &str) -> Result<Axis, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "horizontal" | "x" => Ok(Axis::Horizontal),
        "vertical" | "y" => Ok(Axis::Vertical),
        _ => Err(ConfigError::UnknownKeyword {
            name,
            value: raw.to_string(),
        }),
    }
}
