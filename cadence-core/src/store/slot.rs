//! Per-channel result slot
//!
//! Every field is an individual atomic. The interrupt handler is the only
//! writer of the value fields and the only context that raises `has_new`;
//! foreground readers only ever lower it. Reads that need several fields
//! to agree go through a critical section in [`ResultStore`](super::ResultStore).

use cadence_hal::RESULT_MAX;
use portable_atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

use crate::config::Smoothing;

/// Latest result for one channel
#[derive(Debug)]
pub struct ResultSlot {
    /// Most recent raw conversion
    raw: AtomicU16,
    /// Moving average as `f32` bits
    smoothed_bits: AtomicU32,
    /// Moving average has been seeded
    smoothed_valid: AtomicBool,
    /// A result arrived since the last consuming read
    has_new: AtomicBool,
}

impl Default for ResultSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSlot {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            raw: AtomicU16::new(0),
            smoothed_bits: AtomicU32::new(0),
            smoothed_valid: AtomicBool::new(false),
            has_new: AtomicBool::new(false),
        }
    }

    /// Most recent raw conversion
    pub fn raw(&self) -> u16 {
        self.raw.load(Ordering::Relaxed)
    }

    /// Moving average, once the first result has arrived
    pub fn smoothed(&self) -> Option<f32> {
        if self.smoothed_valid.load(Ordering::Relaxed) {
            Some(f32::from_bits(self.smoothed_bits.load(Ordering::Relaxed)))
        } else {
            None
        }
    }

    /// Check if an unread result is waiting
    pub fn has_new(&self) -> bool {
        self.has_new.load(Ordering::Acquire)
    }

    /// Back to the "no value yet" state
    pub(crate) fn reset(&self) {
        self.raw.store(0, Ordering::Relaxed);
        self.smoothed_bits.store(0, Ordering::Relaxed);
        self.smoothed_valid.store(false, Ordering::Relaxed);
        self.has_new.store(false, Ordering::Release);
    }

    /// Record a finished conversion and flag it as new
    pub(crate) fn publish(&self, raw: u16, smoothing: Smoothing) {
        let raw = raw.min(RESULT_MAX);
        self.raw.store(raw, Ordering::Relaxed);

        if let Smoothing::Exponential { alpha } = smoothing {
            let sample = f32::from(raw);
            let next = match self.smoothed() {
                // First result seeds the average
                None => sample,
                Some(avg) => avg * alpha + sample * (1.0 - alpha),
            };
            self.smoothed_bits.store(next.to_bits(), Ordering::Relaxed);
            self.smoothed_valid.store(true, Ordering::Relaxed);
        }

        self.has_new.store(true, Ordering::Release);
    }

    /// Value a reader should see
    ///
    /// The rounded average when smoothing is on and seeded, otherwise the
    /// raw result.
    pub(crate) fn value(&self, smoothing: Smoothing) -> u16 {
        match (smoothing, self.smoothed()) {
            (Smoothing::Exponential { .. }, Some(avg)) => round_to_result(avg),
            _ => self.raw(),
        }
    }

    pub(crate) fn clear_new(&self) {
        self.has_new.store(false, Ordering::Release);
    }
}

/// Round a non-negative average to the nearest result, halves away from zero
fn round_to_result(avg: f32) -> u16 {
    let rounded = (avg + 0.5) as u16;
    rounded.min(RESULT_MAX)
}
