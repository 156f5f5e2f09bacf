//! Time sources, blocking waits and main loop pacing.
//!
//! Nothing here reads a global clock on its own: the caller hands in either
//! the current `Instant` or a [`TimeSource`], which keeps every blocking
//! animation testable with a fake clock.

use embassy_time::{Duration, Instant};

/// Default main loop period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(5);

/// Granularity of [`SystemClock`] busy-waiting.
const IDLE_STEP: Duration = Duration::from_millis(1);

/// Clock used by blocking operations.
pub trait TimeSource {
    /// Current time
    fn now(&mut self) -> Instant;

    /// Let the platform run its housekeeping while a blocking operation waits.
    ///
    /// Must let time advance; blocking loops call this until their deadline.
    fn idle(&mut self);
}

/// [`TimeSource`] backed by the `embassy-time` driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    housekeeping: Option<fn()>,
}

impl SystemClock {
    pub const fn new() -> Self {
        Self { housekeeping: None }
    }

    /// Run `housekeeping` on every idle step (network stack, OTA polling, ...)
    #[must_use]
    pub const fn with_housekeeping(mut self, housekeeping: fn()) -> Self {
        self.housekeeping = Some(housekeeping);
        self
    }
}

impl TimeSource for SystemClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }

    fn idle(&mut self) {
        if let Some(housekeeping) = self.housekeeping {
            housekeeping();
        }
        embassy_time::block_for(IDLE_STEP);
    }
}

/// Block for `delay`.
pub fn pause<T: TimeSource + ?Sized>(clock: &mut T, delay: Duration) {
    wait_with_fast_forward(clock, delay, 1, || false);
}

/// Block for `delay`, shortened to `delay / divisor` while `hurry` returns true.
///
/// `hurry` is polled on every idle step, so pressing and releasing a button
/// mid-wait speeds up only the part of the wait it was held for.
pub fn wait_with_fast_forward<T, F>(clock: &mut T, delay: Duration, divisor: u32, mut hurry: F)
where
    T: TimeSource + ?Sized,
    F: FnMut() -> bool,
{
    let stopwatch = Stopwatch::start(clock.now());
    let short = delay / divisor.max(1);
    loop {
        let target = if hurry() { short } else { delay };
        if stopwatch.has_elapsed(clock.now(), target) {
            return;
        }
        clock.idle();
    }
}

/// Elapsed time since a starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub const fn start(now: Instant) -> Self {
        Self { start: now }
    }

    pub fn restart(&mut self, now: Instant) {
        self.start = now;
    }

    pub const fn started_at(&self) -> Instant {
        self.start
    }

    /// Time since the start; zero if `now` lies before it
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }

    pub fn has_elapsed(&self, now: Instant, duration: Duration) -> bool {
        self.elapsed(now) >= duration
    }
}

/// Gate for work that runs on its own cadence.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    period: Duration,
    last: Option<Instant>,
}

impl Cadence {
    pub const fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Returns true (and re-arms) when at least one period has passed since
    /// the last time it returned true. The first call is always due.
    pub fn is_due(&mut self, now: Instant) -> bool {
        let due = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.period);
        if due {
            self.last = Some(now);
        }
        due
    }
}

/// Result of a tick pacing step.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable fixed-period pacing for the cooperative main loop.
///
/// The caller does its per-tick work (poll buttons, compose, show), then
/// sleeps for the returned duration.
///
/// # Usage
///
/// ```ignore
/// let mut pacer = TickPacer::new(DEFAULT_TICK_PERIOD);
///
/// loop {
///     let now = Instant::now();
///     buttons.poll(now, &mut pins);
///     // compose and show
///     let result = pacer.tick(now);
///     embassy_time::block_for(result.sleep_duration);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TickPacer {
    next_tick: Instant,
    period: Duration,
}

impl Default for TickPacer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl TickPacer {
    pub const fn new(period: Duration) -> Self {
        Self {
            next_tick: Instant::from_millis(0),
            period,
        }
    }

    /// Account for one tick and return timing information.
    ///
    /// If we have fallen more than two periods behind, the schedule restarts
    /// from `now` instead of bursting to catch up.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let max_drift = self.period * 2;
        if now > self.next_tick + max_drift {
            self.next_tick = now;
        }

        self.next_tick += self.period;

        let sleep_duration = self.next_tick.saturating_duration_since(now);

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }
}
