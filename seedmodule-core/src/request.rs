use std::time::Duration;

use derive_more::Display;
use derive_new::new;
use getset::CopyGetters;

use crate::error::SeedError;

/// The longest duration a single request may sleep.
///
/// Durations travel as 32-bit signed millisecond counts, so anything above
/// `i32::MAX` milliseconds is rejected.
pub const MAX_SLEEP_TIME: Duration = Duration::from_millis(i32::MAX as u64);

/// Identifier of an issued request, unique within one module.
#[derive(new, Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("#{}", _0)]
pub struct RequestId(u64);

impl RequestId {
    /// Returns the next identifier.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A validated request to sleep for some time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct SleepRequest {
    /// The duration to sleep.
    #[getset(get_copy = "pub")]
    sleep_time: Duration,
}

impl SleepRequest {
    /// Creates a new [`SleepRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::DurationOutOfRange`] if `sleep_time` exceeds [`MAX_SLEEP_TIME`].
    pub fn new(sleep_time: Duration) -> Result<Self, SeedError> {
        if sleep_time > MAX_SLEEP_TIME {
            return Err(SeedError::DurationOutOfRange(sleep_time));
        }
        Ok(Self { sleep_time })
    }

    /// Creates a new [`SleepRequest`] from a millisecond count.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::NegativeDuration`] for negative values and
    /// [`SeedError::DurationOutOfRange`] for values above [`MAX_SLEEP_TIME`].
    pub fn from_millis(ms: i64) -> Result<Self, SeedError> {
        let ms = u64::try_from(ms).map_err(|_| SeedError::NegativeDuration(ms))?;
        Self::new(Duration::from_millis(ms))
    }
}

impl TryFrom<Duration> for SleepRequest {
    type Error = SeedError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The result of a completed [`SleepRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters, Display)]
#[display("slept {}ms", slept_time.as_millis())]
pub struct SleepResult {
    /// The duration slept.
    #[getset(get_copy = "pub")]
    slept_time: Duration,
}

impl From<&SleepRequest> for SleepResult {
    fn from(req: &SleepRequest) -> Self {
        Self {
            slept_time: req.sleep_time,
        }
    }
}

/// The value handed to a completion callback.
pub type Completion = Result<SleepResult, SeedError>;
