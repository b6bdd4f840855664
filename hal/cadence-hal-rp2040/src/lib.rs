//! RP2040-specific HAL for the Cadence sampler
//!
//! This crate provides RP2040 implementations of the shared
//! `cadence-hal` traits:
//!
//! - ADC conversion engine driven by the `ADC_IRQ_FIFO` interrupt
//!   (implements `cadence_hal::ConversionEngine`)
//! - ADC input selectors
//! - Wait-for-interrupt idle hook

#![no_std]

pub mod adc;
pub mod idle;

pub use adc::{AdcInput, Rp2040Adc, MIN_CLOCK_DIVIDER};
pub use idle::WaitForInterrupt;

// Re-export shared traits from cadence-hal for convenience
pub use cadence_hal::{ConversionEngine, IdleHook};
