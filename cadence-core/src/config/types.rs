//! Configuration type definitions

use cadence_hal::ReferenceMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default smoothing factor (weight of history)
pub const DEFAULT_ALPHA: f32 = 0.9;

/// Default conversion clock prescaler
pub const DEFAULT_CLOCK_DIVIDER: u16 = 128;

/// Smoothing applied to published results
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Smoothing {
    /// Readers get the latest raw conversion
    #[default]
    Disabled,
    /// Readers get an exponential moving average
    ///
    /// `avg = avg * alpha + raw * (1 - alpha)`. Larger `alpha` filters harder.
    Exponential {
        /// Weight of the previous average, in `[0, 1)`
        alpha: f32,
    },
}

impl Smoothing {
    /// Exponential smoothing with [`DEFAULT_ALPHA`]
    pub const EXPONENTIAL: Self = Self::Exponential {
        alpha: DEFAULT_ALPHA,
    };

    /// Check if smoothing is enabled
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Exponential { .. })
    }
}

/// Behaviour of the startup wait for the analog subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReadyWait {
    /// Poll until the engine reports ready, with no limit
    ///
    /// Initialization never returns if the hardware never becomes ready.
    #[default]
    Forever,
    /// Poll at most `max_polls` times, then fail initialization
    Bounded {
        /// Number of status polls before giving up
        max_polls: u32,
    },
}

/// Conversion engine setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Voltage reference
    pub reference: ReferenceMode,
    /// Conversion clock prescaler
    pub clock_divider: u16,
    /// Startup readiness wait
    pub ready_wait: ReadyWait,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl EngineConfig {
    /// Supply reference, slowest clock, unbounded readiness wait
    pub const DEFAULT: Self = Self {
        reference: ReferenceMode::Supply,
        clock_divider: DEFAULT_CLOCK_DIVIDER,
        ready_wait: ReadyWait::Forever,
    };
}

/// Complete sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// Conversion engine setup
    pub engine: EngineConfig,
    /// Result smoothing
    pub smoothing: Smoothing,
}
