//! Sleepers run by the module's worker threads.
//!
//! A sleeper only ever runs on a blocking-pool thread, never on the thread that owns the
//! module, so blocking for the full duration is expected.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

pub use spin_sleep::{SpinSleeper, SpinStrategy};

/// Blocks the calling worker thread for a request's sleep time.
pub trait Sleep: std::fmt::Debug {
    /// Blocks for no less than `duration`. A zero duration should return promptly.
    fn sleep(&self, duration: Duration);
}

impl Sleep for Box<dyn Sleep + Send + Sync> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// The form in which workers share a sleeper.
impl Sleep for Arc<dyn Sleep + Send + Sync> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// Parks the worker with [`std::thread::sleep`]. The default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StdSleeper;

impl Sleep for StdSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

// Sleeps coarsely, then spins the last stretch for accuracy.
impl Sleep for SpinSleeper {
    fn sleep(&self, duration: Duration) {
        SpinSleeper::sleep(*self, duration);
    }
}

/// Keeps the worker busy until the deadline passes.
///
/// Occupies a whole blocking-pool thread for the request; only useful for short sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpinWaitSleeper;

impl Sleep for SpinWaitSleeper {
    fn sleep(&self, duration: Duration) {
        let start = Instant::now();
        while start.elapsed() < duration {
            std::hint::spin_loop();
        }
    }
}
