//! Cadence - free-running analog sampler firmware
//!
//! The RP2040 ADC converts continuously, one channel after the next, with
//! results published from the `ADC_IRQ_FIFO` interrupt. Application code
//! never starts a conversion; it reads the freshest value per channel.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use cadence_hal_rp2040::{Rp2040Adc, WaitForInterrupt};

use crate::config::{CHANNEL_COUNT, CHANNEL_INPUTS, CHANNEL_NAMES};
use crate::sampling::STORE;

mod config;
mod sampling;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Cadence firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    for (channel, input) in CHANNEL_INPUTS.iter().enumerate() {
        info!(
            "Channel {} '{}': {} (GPIO {})",
            channel,
            CHANNEL_NAMES[channel],
            input,
            input.gpio()
        );
    }

    let adc = Rp2040Adc::new(p.ADC, &CHANNEL_INPUTS);
    if let Err(e) = sampling::start(adc) {
        error!("ADC failed to start: {}", e);
        loop {
            cortex_m::asm::wfi();
        }
    }

    // Wait for the first full round before anything consumes values
    let mut idle = WaitForInterrupt;
    for channel in 0..CHANNEL_COUNT {
        let value = STORE.read_blocking(channel, &mut idle);
        info!("First sample {}: {}", CHANNEL_NAMES[channel], value);
    }

    spawner.spawn(tasks::monitor_task()).unwrap();

    info!("All tasks spawned");
}
