//! Foreground accessors
//!
//! Three read families, each with an 8-bit variant:
//!
//! | Family        | Waits for new data | Critical section | Clears `has_new` |
//! |---------------|--------------------|------------------|------------------|
//! | `read_blocking` | yes              | yes              | yes              |
//! | `read_last`     | no               | yes              | yes              |
//! | `read_unsync`   | no               | no               | yes              |
//!
//! Values are smoothed when the store was built with smoothing enabled.
//! The 8-bit variants drop the two low bits of the same value.

use cadence_hal::{narrow_to_8bit, IdleHook};

use super::ResultStore;

impl<const N: usize> ResultStore<N> {
    /// Wait for a result for `channel` that no reader has consumed, then
    /// consume it
    ///
    /// Calls `idle` once per poll while waiting. There is no timeout; poll
    /// [`has_new`](Self::has_new) to build one.
    ///
    /// # Panics
    /// If `channel >= N`.
    pub fn read_blocking<H: IdleHook>(&self, channel: usize, idle: &mut H) -> u16 {
        let slot = self.slot(channel);
        while !slot.has_new() {
            idle.idle();
        }
        self.read_last(channel)
    }

    /// [`read_blocking`](Self::read_blocking) narrowed to 8 bits
    pub fn read_blocking8<H: IdleHook>(&self, channel: usize, idle: &mut H) -> u8 {
        narrow_to_8bit(self.read_blocking(channel, idle))
    }

    /// Consume the latest result for `channel`
    ///
    /// The read and the flag clear happen in one critical section, so a
    /// result published concurrently is either returned here or left
    /// flagged for the next reader.
    ///
    /// # Panics
    /// If `channel >= N`.
    pub fn read_last(&self, channel: usize) -> u16 {
        let slot = self.slot(channel);
        critical_section::with(|_| {
            let value = slot.value(self.smoothing);
            slot.clear_new();
            value
        })
    }

    /// [`read_last`](Self::read_last) narrowed to 8 bits
    pub fn read_last8(&self, channel: usize) -> u8 {
        narrow_to_8bit(self.read_last(channel))
    }

    /// Consume the latest result for `channel` without a critical section
    ///
    /// Cheaper than [`read_last`](Self::read_last). If the handler publishes
    /// between the read and the flag clear, that newer result loses its
    /// `has_new` flag and the returned value may mix raw and smoothed state
    /// from two conversions. Use it from a context that already masks the
    /// conversion interrupt, or where that race is acceptable.
    ///
    /// # Panics
    /// If `channel >= N`.
    pub fn read_unsync(&self, channel: usize) -> u16 {
        let slot = self.slot(channel);
        let value = slot.value(self.smoothing);
        slot.clear_new();
        value
    }

    /// [`read_unsync`](Self::read_unsync) narrowed to 8 bits
    pub fn read_unsync8(&self, channel: usize) -> u8 {
        narrow_to_8bit(self.read_unsync(channel))
    }

    /// Latest value of every channel without consuming anything
    ///
    /// All channels are copied inside one critical section.
    pub fn peek_all(&self) -> [u16; N] {
        critical_section::with(|_| {
            core::array::from_fn(|channel| self.slots[channel].value(self.smoothing))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Smoothing;
    use crate::store::ResultStore;

    #[test]
    fn test_read_last_consumes() {
        let store: ResultStore<2> = ResultStore::new(Smoothing::Disabled);
        store.publish(0, 640);

        assert_eq!(store.read_last(0), 640);
        assert!(!store.has_new(0));

        // Second read returns the same value, flag stays down
        assert_eq!(store.read_last(0), 640);
        assert!(!store.has_new(0));
    }

    #[test]
    fn test_read_unsync_consumes() {
        let store: ResultStore<2> = ResultStore::new(Smoothing::Disabled);
        store.publish(1, 321);

        assert_eq!(store.read_unsync(1), 321);
        assert!(!store.has_new(1));
        assert_eq!(store.read_unsync(1), 321);
        assert!(!store.has_new(1));
    }

    #[test]
    fn test_8bit_variants() {
        let store: ResultStore<1> = ResultStore::new(Smoothing::Disabled);
        store.publish(0, 1023);
        assert_eq!(store.read_last8(0), 255);
        store.publish(0, 2);
        assert_eq!(store.read_unsync8(0), 0);
        store.publish(0, 4);
        let mut idle = || {};
        assert_eq!(store.read_blocking8(0, &mut idle), 1);
    }

    #[test]
    fn test_blocking_read_returns_pending_value() {
        let store: ResultStore<2> = ResultStore::new(Smoothing::Disabled);
        store.publish(1, 99);

        let mut polls = 0;
        let value = store.read_blocking(1, &mut || polls += 1);
        assert_eq!(value, 99);
        assert_eq!(polls, 0);
        assert!(!store.has_new(1));
    }

    #[test]
    fn test_blocking_read_waits_for_publish() {
        let store: ResultStore<2> = ResultStore::new(Smoothing::Disabled);
        store.publish(0, 5);
        store.read_last(0);

        // The hook stands in for the interrupt: third poll delivers a result
        let mut polls = 0;
        let value = store.read_blocking(0, &mut || {
            polls += 1;
            if polls == 3 {
                store.publish(0, 6);
            }
        });
        assert_eq!(value, 6);
        assert_eq!(polls, 3);
    }

    #[test]
    fn test_smoothed_reads() {
        let store: ResultStore<1> = ResultStore::new(Smoothing::EXPONENTIAL);
        store.publish(0, 1000);
        store.publish(0, 0);

        // Readers see the rounded average, not the last raw result
        assert_eq!(store.read_last(0), 900);
        assert_eq!(store.read_last8(0), 225);
        assert_eq!(store.slot(0).raw(), 0);
    }

    #[test]
    fn test_every_read_family_is_smoothed() {
        let store: ResultStore<1> = ResultStore::new(Smoothing::EXPONENTIAL);
        let mut idle = || {};

        // 1000 seeds the average, 0 pulls it to 900
        store.publish(0, 1000);
        store.publish(0, 0);
        assert_eq!(store.read_blocking(0, &mut idle), 900);

        store.publish(0, 0);
        assert_eq!(store.read_blocking8(0, &mut idle), 202); // 810 >> 2

        store.publish(0, 0);
        assert_eq!(store.read_unsync(0), 729);
        assert!(!store.has_new(0));

        store.publish(0, 0);
        assert_eq!(store.read_unsync8(0), 164); // 656 >> 2

        // The raw result is never what readers see here
        assert_eq!(store.slot(0).raw(), 0);
    }

    #[test]
    fn test_peek_all_does_not_consume() {
        let store: ResultStore<3> = ResultStore::new(Smoothing::Disabled);
        store.publish(0, 10);
        store.publish(2, 30);

        assert_eq!(store.peek_all(), [10, 0, 30]);
        assert!(store.has_new(0));
        assert!(store.has_new(2));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_read_last_out_of_range() {
        let store: ResultStore<3> = ResultStore::new(Smoothing::Disabled);
        store.read_last(3);
    }
}
