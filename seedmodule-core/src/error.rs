use std::time::Duration;

use thiserror::Error;

use crate::request::MAX_SLEEP_TIME;

/// An error produced by a sleep request.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum SeedError {
    /// A negative number of milliseconds was given.
    #[error("Sleep time must be non-negative, but {0} ms was given")]
    NegativeDuration(i64),
    /// The duration does not fit in [`MAX_SLEEP_TIME`].
    #[error("Sleep time ({0:?}) exceeds the maximum ({max:?})", max = MAX_SLEEP_TIME)]
    DurationOutOfRange(Duration),
    /// The work failed on the worker thread.
    #[error("Sleep work failed: {0}")]
    WorkFailed(String),
    /// The module went away before the completion was delivered.
    #[error("Module was closed before the request completed")]
    ModuleClosed,
    /// The runtime could not be created.
    #[error("Failed to create runtime: {0}")]
    Runtime(String),
}

impl From<std::io::Error> for SeedError {
    fn from(e: std::io::Error) -> Self {
        SeedError::Runtime(e.to_string())
    }
}
