//! Drag-to-step
//!
//! Displacement is always measured from where the gesture started; the
//! origin is never reset mid-drag. Every pointer sample past the threshold
//! re-arms one debounced step, so a continuous drag produces a single step
//! once the pointer has been still for the debounce window.

use std::time::{Duration, Instant};

use coral_core::timer::Debouncer;

use crate::navigation::Direction;

/// Window that coalesces pointer samples into one step
pub const DRAG_STEP_WINDOW: Duration = Duration::from_millis(100);

/// Delay before the track drops its grab marker after release
pub const GRAB_RELEASE_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug)]
pub struct DragTracker {
    threshold: f32,
    origin: Option<f32>,
    step: Debouncer<Direction>,
    release: Debouncer<()>,
}

impl DragTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.abs(),
            origin: None,
            step: Debouncer::new(DRAG_STEP_WINDOW),
            release: Debouncer::new(GRAB_RELEASE_WINDOW),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    pub fn begin(&mut self, position: f32) {
        self.origin = Some(position);
        self.release.cancel();
    }

    /// Feed a pointer sample along the scroll axis
    ///
    /// Moving toward the start of the axis (left / up) pulls the next slide in.
    pub fn move_to(&mut self, position: f32, now: Instant) {
        let Some(origin) = self.origin else {
            return;
        };
        let displacement = position - origin;
        if displacement < -self.threshold {
            self.step.call(Direction::Next, now);
        } else if displacement > self.threshold {
            self.step.call(Direction::Previous, now);
        }
    }

    /// End the gesture; a pending step still fires
    pub fn end(&mut self, now: Instant) {
        if self.origin.take().is_some() {
            self.release.call((), now);
        }
    }

    /// Debounced step that became due
    pub fn poll_step(&mut self, now: Instant) -> Option<Direction> {
        self.step.poll(now)
    }

    /// True once the grab marker should be cleared
    pub fn poll_release(&mut self, now: Instant) -> bool {
        self.release.poll(now).is_some()
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.step.cancel();
        self.release.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_below_threshold_does_nothing() {
        let t0 = Instant::now();
        let mut drag = DragTracker::new(100.0);
        drag.begin(500.0);
        drag.move_to(420.0, t0);
        drag.move_to(600.0, t0);
        assert_eq!(drag.poll_step(t0 + ms(500)), None);
    }

    #[test]
    fn test_burst_past_threshold_steps_once() {
        let t0 = Instant::now();
        let mut drag = DragTracker::new(100.0);
        drag.begin(500.0);

        for i in 0..8u64 {
            drag.move_to(390.0 - i as f32 * 20.0, t0 + ms(i * 10));
        }
        assert_eq!(drag.poll_step(t0 + ms(150)), None);
        assert_eq!(drag.poll_step(t0 + ms(170)), Some(Direction::Next));
        assert_eq!(drag.poll_step(t0 + ms(400)), None);
    }

    #[test]
    fn test_origin_is_not_reset() {
        let t0 = Instant::now();
        let mut drag = DragTracker::new(100.0);
        drag.begin(0.0);

        drag.move_to(150.0, t0);
        assert_eq!(drag.poll_step(t0 + ms(100)), Some(Direction::Previous));

        // Still measured from 0, not from 150
        drag.move_to(160.0, t0 + ms(200));
        assert_eq!(drag.poll_step(t0 + ms(300)), Some(Direction::Previous));
    }

    #[test]
    fn test_release_marker_after_end() {
        let t0 = Instant::now();
        let mut drag = DragTracker::new(100.0);
        drag.begin(0.0);
        drag.end(t0);
        assert!(!drag.is_dragging());
        assert!(!drag.poll_release(t0 + ms(999)));
        assert!(drag.poll_release(t0 + ms(1000)));

        // A new grab cancels a pending release
        drag.end(t0);
        drag.begin(0.0);
        drag.end(t0 + ms(500));
        assert!(!drag.poll_release(t0 + ms(1200)));
        assert!(drag.poll_release(t0 + ms(1500)));
    }
}
