//! Sampler state machine
//!
//! Drives the conversion engine round-robin over the channel table from
//! the conversion-complete interrupt.

pub mod cursor;
pub mod round_robin;

pub use cursor::SamplerCursor;
pub use round_robin::Sampler;
