//! Sampler wiring
//!
//! Owns the process-lifetime sampler state and routes the ADC FIFO
//! interrupt to it.
//!
//! - [`STORE`] is shared with every foreground reader.
//! - [`SAMPLER`] is only touched by [`start`] (before the interrupt is
//!   enabled) and by the interrupt handler.

use core::cell::RefCell;

use defmt::*;
use embassy_rp::interrupt;
use embassy_rp::interrupt::InterruptExt;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use cadence_core::{InitError, ResultStore, Sampler};
use cadence_hal_rp2040::Rp2040Adc;

use crate::config::{CHANNEL_COUNT, CHANNEL_TABLE, SAMPLER_CONFIG};

type AdcSampler = Sampler<Rp2040Adc<'static>, CHANNEL_COUNT>;

/// Latest result of every channel
pub static STORE: ResultStore<CHANNEL_COUNT> = ResultStore::new(SAMPLER_CONFIG.smoothing);

/// Sampler driven by `ADC_IRQ_FIFO`
static SAMPLER: Mutex<CriticalSectionRawMutex, RefCell<Option<AdcSampler>>> =
    Mutex::new(RefCell::new(None));

/// Initialize the sampler and enable the conversion interrupt
///
/// Resets [`STORE`], arms the first conversion on channel 0 and hands the
/// sampler over to the interrupt handler.
pub fn start(adc: Rp2040Adc<'static>) -> Result<(), InitError> {
    let mut sampler = Sampler::new(adc, CHANNEL_TABLE, SAMPLER_CONFIG.engine);
    sampler.initialize(&STORE)?;

    SAMPLER.lock(|cell| *cell.borrow_mut() = Some(sampler));

    interrupt::ADC_IRQ_FIFO.unpend();
    // SAFETY: the handler only touches SAMPLER and STORE, both installed above
    unsafe { interrupt::ADC_IRQ_FIFO.enable() };

    info!("Sampler running on {} channels", CHANNEL_COUNT);
    Ok(())
}

/// Completed conversions since start
pub fn conversions() -> u32 {
    SAMPLER.lock(|cell| cell.borrow().as_ref().map_or(0, |s| s.conversions()))
}

#[interrupt]
fn ADC_IRQ_FIFO() {
    SAMPLER.lock(|cell| {
        if let Some(sampler) = cell.borrow_mut().as_mut() {
            sampler.on_conversion_complete(&STORE);
        }
    });
}
