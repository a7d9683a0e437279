#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::unescaped_backticks)]

//! Core traits and types for seedmodule.

/// Error type shared by the module and its callers.
pub mod error;
/// Sleep requests and their results.
pub mod request;
pub mod sleep;
