use std::{num::NonZeroUsize, sync::Arc};

use seedmodule_core::sleep::{Sleep, SpinSleeper, SpinWaitSleeper, StdSleeper};

/// The way worker threads wait out a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
#[non_exhaustive]
pub enum TimerStrategy {
    /// Use [`StdSleeper`].
    #[default]
    StdSleep = 0,
    /// Use [`SpinSleeper`].
    SpinSleep = 1,
    /// Use [`SpinWaitSleeper`].
    SpinWait = 2,
}

impl TimerStrategy {
    pub(crate) fn sleeper(self) -> Arc<dyn Sleep + Send + Sync> {
        match self {
            TimerStrategy::StdSleep => Arc::new(StdSleeper),
            TimerStrategy::SpinSleep => Arc::new(SpinSleeper::default()),
            TimerStrategy::SpinWait => Arc::new(SpinWaitSleeper),
        }
    }
}

/// The option of [`SeedModule`].
///
/// [`SeedModule`]: crate::SeedModule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOption {
    /// The number of async worker threads. If `None`, tokio's default is used.
    pub worker_threads: Option<NonZeroUsize>,
    /// The upper bound of threads that run sleeps. If `None`, tokio's default is used.
    pub max_blocking_threads: Option<NonZeroUsize>,
    /// The name given to the runtime's threads.
    pub thread_name: String,
    /// The sleeper used by workers.
    pub timer_strategy: TimerStrategy,
}

impl Default for ModuleOption {
    fn default() -> Self {
        Self {
            worker_threads: NonZeroUsize::new(1),
            max_blocking_threads: None,
            thread_name: "seedmodule-worker".to_string(),
            timer_strategy: TimerStrategy::StdSleep,
        }
    }
}
