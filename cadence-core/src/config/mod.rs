//! Sampler configuration
//!
//! Construction-time options for the conversion engine and the result
//! store. Boards usually build these as constants.

pub mod types;

pub use types::*;
