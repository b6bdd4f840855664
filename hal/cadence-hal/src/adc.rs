//! Analog conversion engine abstraction
//!
//! A conversion engine digitizes one analog input at a time. The sampler
//! only ever asks it to start the next conversion and, from the
//! conversion-complete interrupt, to hand over the finished result.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Resolution of a raw conversion result in bits
pub const RESULT_BITS: u32 = 10;

/// Largest raw result an engine may report
pub const RESULT_MAX: u16 = (1 << RESULT_BITS) - 1;

/// Voltage reference used for conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReferenceMode {
    /// Analog supply rail (AVCC) as reference
    #[default]
    Supply,
    /// Internal bandgap reference
    Internal,
    /// External reference pin
    External,
}

/// Conversion peripheral driven by the sampler
///
/// Implementations own the peripheral registers. The contract with the
/// sampler is:
///
/// - [`arm_conversion`](Self::arm_conversion) selects an input and starts a
///   single conversion with the completion interrupt enabled.
/// - When that conversion finishes the hardware raises the interrupt that
///   the board routes to the sampler's handler.
/// - Inside that handler [`read_last_result`](Self::read_last_result)
///   returns the finished value and acknowledges the interrupt.
pub trait ConversionEngine {
    /// Engine-specific code naming a physical input
    type Selector: Copy;

    /// Program the reference and conversion clock
    ///
    /// # Arguments
    /// * `reference` - Voltage reference to convert against
    /// * `clock_divider` - Prescaler applied to the peripheral clock
    fn configure(&mut self, reference: ReferenceMode, clock_divider: u16);

    /// Whether the analog supply and reference have settled
    ///
    /// Engines without a readiness indication are always ready.
    fn status_ready(&self) -> bool {
        true
    }

    /// Select `selector` and start a conversion with the completion
    /// interrupt enabled
    fn arm_conversion(&mut self, selector: Self::Selector);

    /// Fetch the result of the conversion that just completed
    ///
    /// Values are in the `0..=RESULT_MAX` range.
    fn read_last_result(&mut self) -> u16;
}

/// Narrow a 10-bit value to 8 bits by dropping the two low bits
///
/// No rounding is applied: `1023 -> 255`, `4 -> 1`, `3 -> 0`. Values above
/// [`RESULT_MAX`] saturate to 255.
#[inline]
pub const fn narrow_to_8bit(value: u16) -> u8 {
    let value = if value > RESULT_MAX { RESULT_MAX } else { value };
    (value >> (RESULT_BITS - 8)) as u8
}
