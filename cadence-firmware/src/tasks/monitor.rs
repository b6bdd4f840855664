//! Channel monitor task
//!
//! Periodically reports the latest value of every channel. Channels that
//! produced no new sample since the previous report are flagged as stale.

use defmt::*;
use embassy_time::{Duration, Ticker};

use cadence_core::registers::Window;

use crate::config::{CHANNEL_COUNT, CHANNEL_NAMES, MONITOR_INTERVAL_MS};
use crate::sampling::{self, STORE};

/// Monitor task - logs channel values at a fixed interval
#[embassy_executor::task]
pub async fn monitor_task() {
    info!("Monitor task started");

    let mut ticker = Ticker::every(Duration::from_millis(MONITOR_INTERVAL_MS));
    let mut last_conversions = sampling::conversions();

    loop {
        ticker.next().await;

        for (channel, name) in CHANNEL_NAMES.iter().enumerate() {
            let fresh = STORE.has_new(channel);
            let value = STORE.read_last(channel);
            if fresh {
                debug!("{}: {}", name, value);
            } else {
                warn!("{}: stale, last value {}", name, value);
            }
        }

        match STORE.window(Window::Adc8) {
            Ok(bytes) => info!("adc8 window: {=[u8]:02x}", bytes.as_slice()),
            Err(e) => error!("adc8 window: {}", e),
        }

        let conversions = sampling::conversions();
        let per_channel = conversions.wrapping_sub(last_conversions) / CHANNEL_COUNT as u32;
        info!(
            "{} conversions per channel in {} ms",
            per_channel, MONITOR_INTERVAL_MS
        );
        last_conversions = conversions;
    }
}
