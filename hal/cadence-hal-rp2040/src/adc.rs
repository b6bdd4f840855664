//! RP2040 ADC conversion engine
//!
//! RP2040 has a single 12-bit ADC with 5 inputs:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//! - ADC4: Internal temperature sensor
//!
//! The engine runs the ADC in `START_MANY` mode, paced by the `DIV`
//! register, and raises `ADC_IRQ_FIFO` as soon as one result sits in the
//! FIFO. Arming a conversion only changes `AINSEL`; the hardware latches
//! it when the next paced conversion starts. The pacing interval must
//! therefore leave room for the handler to run between two conversions,
//! which is why the prescaler never goes below [`MIN_CLOCK_DIVIDER`].

use cadence_hal::{ConversionEngine, ReferenceMode};
use embassy_rp::pac;
use embassy_rp::peripherals::ADC;
use embassy_rp::Peri;

/// ADC clock cycles per conversion
pub const CYCLES_PER_CONVERSION: u32 = 96;

/// Smallest prescaler the engine runs at
///
/// At 4 x 96 ADC cycles (8 us at 48 MHz) the FIFO handler has finished
/// re-arming `AINSEL` long before the next paced conversion latches it.
/// Smaller values are raised to this one.
pub const MIN_CLOCK_DIVIDER: u16 = 4;

/// Bits dropped to bring 12-bit results into the 10-bit result range
const RESULT_SHIFT: u16 = 2;

/// ADC input selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcInput {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
    /// Internal temperature sensor
    Temperature,
}

impl AdcInput {
    /// Value for the `AINSEL` field
    pub fn ainsel(&self) -> u8 {
        match self {
            AdcInput::Adc0 => 0,
            AdcInput::Adc1 => 1,
            AdcInput::Adc2 => 2,
            AdcInput::Adc3 => 3,
            AdcInput::Temperature => 4,
        }
    }

    /// Get the GPIO pin for this ADC input
    pub fn gpio(&self) -> Option<u8> {
        match self {
            AdcInput::Adc0 => Some(26),
            AdcInput::Adc1 => Some(27),
            AdcInput::Adc2 => Some(28),
            AdcInput::Adc3 => Some(29),
            AdcInput::Temperature => None,
        }
    }

    /// Get ADC input from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcInput::Adc0),
            27 => Some(AdcInput::Adc1),
            28 => Some(AdcInput::Adc2),
            29 => Some(AdcInput::Adc3),
            _ => None,
        }
    }
}

/// Interrupt-driven RP2040 ADC
pub struct Rp2040Adc<'d> {
    _adc: Peri<'d, ADC>,
}

impl<'d> Rp2040Adc<'d> {
    /// Take the ADC out of reset and prepare the pads of `inputs`
    ///
    /// GPIO-backed inputs get their digital input buffer and pulls
    /// disabled. The temperature sensor is powered if it is listed.
    pub fn new(adc: Peri<'d, ADC>, inputs: &[AdcInput]) -> Self {
        pac::RESETS.reset().modify(|w| w.set_adc(true));
        pac::RESETS.reset().modify(|w| w.set_adc(false));
        while !pac::RESETS.reset_done().read().adc() {}

        for input in inputs {
            if let Some(gpio) = input.gpio() {
                pac::PADS_BANK0.gpio(usize::from(gpio)).modify(|w| {
                    w.set_ie(false);
                    w.set_pue(false);
                    w.set_pde(false);
                });
            }
        }

        let temperature = inputs.contains(&AdcInput::Temperature);
        pac::ADC.cs().write(|w| w.set_ts_en(temperature));

        Self { _adc: adc }
    }

    /// Pacing value for the `DIV` register
    ///
    /// The prescaler stretches the 96-cycle conversion time, saturating at
    /// the register width. Prescalers below [`MIN_CLOCK_DIVIDER`] are raised
    /// to it.
    fn pacing(clock_divider: u16) -> u16 {
        let cycles = u32::from(clock_divider.max(MIN_CLOCK_DIVIDER)) * CYCLES_PER_CONVERSION;
        u16::try_from(cycles - 1).unwrap_or(u16::MAX)
    }
}

impl ConversionEngine for Rp2040Adc<'_> {
    type Selector = AdcInput;

    fn configure(&mut self, reference: ReferenceMode, clock_divider: u16) {
        if reference != ReferenceMode::External {
            // The RP2040 ADC always converts against the ADC_VREF pin
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "ADC reference {} not selectable, using ADC_VREF",
                reference
            );
        }

        let adc = pac::ADC;
        adc.cs().modify(|w| {
            w.set_en(true);
            w.set_start_many(false);
            w.set_rrobin(0);
        });
        adc.div().write(|w| {
            w.set_int(Self::pacing(clock_divider));
            w.set_frac(0);
        });

        // Interrupt on every result
        adc.fcs().write(|w| {
            w.set_en(true);
            w.set_thresh(1);
            w.set_shift(false);
            w.set_dreq_en(false);
        });
        while !adc.fcs().read().empty() {
            let _ = adc.fifo().read();
        }
        adc.inte().write(|w| w.set_fifo(true));

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ADC configured: DIV={}",
            Self::pacing(clock_divider)
        );
    }

    fn status_ready(&self) -> bool {
        pac::ADC.cs().read().ready()
    }

    fn arm_conversion(&mut self, selector: AdcInput) {
        pac::ADC.cs().modify(|w| {
            w.set_ainsel(selector.ainsel());
            w.set_start_many(true);
        });
    }

    fn read_last_result(&mut self) -> u16 {
        // Popping the FIFO drops its level below the threshold and
        // acknowledges the interrupt
        pac::ADC.fifo().read().val() >> RESULT_SHIFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacing_scales_conversion_time() {
        assert_eq!(Rp2040Adc::pacing(128), 128 * 96 - 1);
        assert_eq!(Rp2040Adc::pacing(682), 682 * 96 - 1);
    }

    #[test]
    fn test_pacing_leaves_handler_headroom() {
        let floor = MIN_CLOCK_DIVIDER * 96 - 1;
        assert_eq!(Rp2040Adc::pacing(0), floor);
        assert_eq!(Rp2040Adc::pacing(1), floor);
        assert_eq!(Rp2040Adc::pacing(MIN_CLOCK_DIVIDER - 1), floor);
        // Back-to-back conversions would latch AINSEL before the re-arm
        assert!(Rp2040Adc::pacing(1) > 95);
    }

    #[test]
    fn test_pacing_saturates() {
        assert_eq!(Rp2040Adc::pacing(u16::MAX), u16::MAX);
    }

    #[test]
    fn test_gpio_mapping() {
        assert_eq!(AdcInput::Adc0.gpio(), Some(26));
        assert_eq!(AdcInput::Temperature.gpio(), None);
        assert_eq!(AdcInput::from_gpio(29), Some(AdcInput::Adc3));
        assert_eq!(AdcInput::from_gpio(25), None);
        assert_eq!(AdcInput::Temperature.ainsel(), 4);
    }
}
