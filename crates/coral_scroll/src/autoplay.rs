//! Autoplay timer
//!
//! ```text
//!            pause (pointer down / enter)
//!   Running ─────────────────────────────► Paused
//!      ▲   ◄─────────────────────────────    │
//!      │     resume (pointer up / leave)     │
//!      │     restart debounce 100 ms         │
//!      └─ interval ─► fire debounce 100 ms ─► advance (unless paused)
//! ```
//!
//! Every pause and resume cancels the interval. The next period is only
//! scheduled once the restart debounce has settled, so a burst of
//! enter/leave events cannot leave a second timer running. A change
//! announced by the same slider (`hold`) restarts the period the same way.

use std::time::{Duration, Instant};

use coral_core::timer::{Debouncer, Interval};

pub const RESTART_WINDOW: Duration = Duration::from_millis(100);
pub const FIRE_WINDOW: Duration = Duration::from_millis(100);

/// Value of the root `--animation-state` property
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Running,
    Paused,
}

impl AnimationState {
    pub fn as_css(self) -> &'static str {
        match self {
            AnimationState::Running => "running",
            AnimationState::Paused => "paused",
        }
    }
}

#[derive(Debug)]
pub struct Autoplay {
    interval: Interval,
    restart: Debouncer<()>,
    fire: Debouncer<()>,
    paused: bool,
}

impl Autoplay {
    pub fn new(period: Duration) -> Self {
        Self {
            interval: Interval::new(period),
            restart: Debouncer::new(RESTART_WINDOW),
            fire: Debouncer::new(FIRE_WINDOW),
            paused: false,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.paused = false;
        self.interval.start(now);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_running()
    }

    pub fn state(&self) -> AnimationState {
        if self.paused {
            AnimationState::Paused
        } else {
            AnimationState::Running
        }
    }

    /// User interaction started
    pub fn pause(&mut self) {
        self.paused = true;
        self.interval.cancel();
        self.restart.cancel();
        self.fire.cancel();
    }

    /// User interaction ended; the period restarts after the restart window
    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.interval.cancel();
        self.restart.call((), now);
    }

    /// The slider just announced a change of its own
    pub fn hold(&mut self, now: Instant) {
        if self.paused {
            return;
        }
        self.interval.cancel();
        self.fire.cancel();
        self.restart.call((), now);
    }

    /// Advance timers; true when the slider should step to the next slide
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.restart.poll(now).is_some() && !self.paused {
            self.interval.start(now);
        }
        if self.interval.poll(now) {
            self.fire.call((), now);
        }
        self.fire.poll(now).is_some() && !self.paused
    }

    pub fn cancel(&mut self) {
        self.interval.cancel();
        self.restart.cancel();
        self.fire.cancel();
    }
}
