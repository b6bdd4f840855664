//! Board-agnostic core of the Cadence analog sampler
//!
//! A conversion-complete interrupt walks round-robin through a fixed
//! table of analog inputs, publishing each finished result into a shared
//! [`ResultStore`]. Foreground code never starts a conversion; it reads the
//! freshest value for a channel, optionally waiting for a new one.
//!
//! - Channel table (logical index to physical selector)
//! - Sampler state machine and interrupt handler
//! - Result store with blocking, snapshot and unsynchronized reads
//! - Optional exponential smoothing
//! - Register windows for bulk export of all channels
//!
//! # Ownership
//!
//! ```text
//!   interrupt context                 foreground
//!  ┌──────────────────┐          ┌──────────────────┐
//!  │ &mut Sampler     │          │ read_blocking()  │
//!  │  cursor, engine  │ publish  │ read_last()      │
//!  │                  ├────────► │ read_unsync()    │
//!  └──────────────────┘ &Store   └──────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod channel;
pub mod config;
pub mod error;
pub mod registers;
pub mod sampler;
pub mod store;

#[cfg(test)]
mod mock;

pub use channel::ChannelTable;
pub use config::{EngineConfig, ReadyWait, SamplerConfig, Smoothing};
pub use error::InitError;
pub use sampler::{Sampler, SamplerCursor};
pub use store::{ResultSlot, ResultStore};
