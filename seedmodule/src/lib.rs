#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

//! Non-blocking sleep requests with completion callbacks.
//!
//! A [`SeedModule`] accepts a duration and a callback, sleeps on a worker
//! thread, and hands the result back to the thread that owns the module.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use seedmodule::prelude::*;
//!
//! # fn main() -> Result<(), SeedError> {
//! let mut module = SeedModule::new()?;
//! module.invoke_async(Duration::from_millis(100), |res| match res {
//!     Ok(res) => println!("Finished sleeping for {} milliseconds", res.slept_time().as_millis()),
//!     Err(e) => eprintln!("{e}"),
//! })?;
//! println!("Note that we're not blocking!");
//! module.run();
//! # Ok(())
//! # }
//! ```

/// The module and its completion loop.
pub mod module;
/// Options of [`SeedModule`].
pub mod option;
/// Commonly used types.
pub mod prelude;
mod work;

pub use seedmodule_core as core;

pub use module::{SeedModule, SleepFuture};
pub use option::{ModuleOption, TimerStrategy};
