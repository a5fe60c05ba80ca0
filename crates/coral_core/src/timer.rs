//! Tick-driven timers
//!
//! The slider never owns a thread or a platform timer. Deferred work is
//! recorded as a deadline and executed when the host polls with the current
//! time, the same way the animation scheduler is ticked once per frame.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use coral_core::timer::Debouncer;
//!
//! let t0 = Instant::now();
//! let mut step = Debouncer::new(Duration::from_millis(100));
//!
//! step.call("first", t0);
//! step.call("second", t0 + Duration::from_millis(40));
//!
//! // Still inside the window of the last call
//! assert_eq!(step.poll(t0 + Duration::from_millis(100)), None);
//! assert_eq!(step.poll(t0 + Duration::from_millis(140)), Some("second"));
//! ```

use std::time::{Duration, Instant};

/// Deferred invocation with cancel-and-reschedule semantics
///
/// Every `call` replaces any pending invocation and restarts the window, so a
/// burst of calls produces exactly one execution carrying the last arguments.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `args`, superseding whatever was pending
    pub fn call(&mut self, args: T, now: Instant) {
        self.pending = Some((now + self.window, args));
    }

    /// Take the pending arguments if their deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}

/// Repeating timer
///
/// Fires at most once per poll. If the host stalls for several periods the
/// missed ticks collapse into one and the schedule re-aligns to the period.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_fire: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_fire: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// (Re)start counting a full period from `now`
    pub fn start(&mut self, now: Instant) {
        self.next_fire = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_fire = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Returns true if at least one period elapsed since the last fire
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(mut next) = self.next_fire else {
            return false;
        };
        if next > now {
            return false;
        }
        // A zero period would never advance past `now`
        if self.period.is_zero() {
            self.next_fire = Some(now);
            return true;
        }
        while next <= now {
            next += self.period;
        }
        self.next_fire = Some(next);
        true
    }
}
