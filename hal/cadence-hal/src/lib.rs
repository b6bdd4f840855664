//! Cadence Hardware Abstraction Layer
//!
//! This crate defines the hardware boundary of the sampler. Chip-specific
//! HALs implement these traits so the same sampling core can run on
//! different microcontrollers (and against mocks on the host).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (cadence-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-core (sampler, result store)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ cadence-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`adc::ConversionEngine`] - Analog conversion peripheral
//! - [`idle::IdleHook`] - Work to run while a reader waits for a sample

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod idle;

// Re-export key traits at crate root for convenience
pub use adc::{narrow_to_8bit, ConversionEngine, ReferenceMode, RESULT_BITS, RESULT_MAX};
pub use idle::{IdleHook, Spin};
