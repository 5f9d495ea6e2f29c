//! Time source and sleeps used by the controller

use parking_lot::Mutex;
use std::thread;
use std::time::Duration;

/// Scheduling dependency of the controller. Every wait in a cycle goes
/// through [`Clock::sleep`], so tests can run cycles on virtual time.
pub trait Clock: Send + Sync {
    /// Block the calling thread for `duration`
    fn sleep(&self, duration: Duration);

    /// Time elapsed according to this clock; used to measure `hold`
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by `std::thread::sleep`
#[derive(Debug)]
pub struct SystemClock {
    started: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Virtual clock: sleeping advances time instantly and is recorded
#[derive(Debug, Default)]
pub struct ManualClock {
    inner: Mutex<ManualClockState>,
}

#[derive(Debug, Default)]
struct ManualClockState {
    now: Duration,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sleep requested so far, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner.lock().sleeps.clone()
    }

    /// Move virtual time forward without recording a sleep
    pub fn advance(&self, duration: Duration) {
        self.inner.lock().now += duration;
    }
}

impl Clock for ManualClock {
    fn sleep(&self, duration: Duration) {
        let mut state = self.inner.lock();
        state.now += duration;
        state.sleeps.push(duration);
    }

    fn elapsed(&self) -> Duration {
        self.inner.lock().now
    }
}
