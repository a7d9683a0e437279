pub use seedmodule_core::{
    error::SeedError,
    request::{Completion, RequestId, SleepRequest, SleepResult, MAX_SLEEP_TIME},
    sleep::{Sleep, SpinSleeper, SpinWaitSleeper, StdSleeper},
};

pub use crate::{
    module::{SeedModule, SleepFuture},
    option::{ModuleOption, TimerStrategy},
};
