//! Result store
//!
//! Holds the latest conversion for every channel. The interrupt handler
//! publishes into it; foreground code reads from it through the accessors
//! in [`read`].
//!
//! The store is designed to live in a `static` so that both contexts can
//! reach it:
//!
//! ```ignore
//! static STORE: ResultStore<5> = ResultStore::new(Smoothing::Disabled);
//! ```

pub mod read;
pub mod slot;

pub use slot::ResultSlot;

use crate::config::Smoothing;

/// Latest results for `N` channels
#[derive(Debug)]
pub struct ResultStore<const N: usize> {
    slots: [ResultSlot; N],
    smoothing: Smoothing,
}

impl<const N: usize> ResultStore<N> {
    /// Create a store with every channel in the "no value yet" state
    pub const fn new(smoothing: Smoothing) -> Self {
        Self {
            slots: [const { ResultSlot::new() }; N],
            smoothing,
        }
    }

    /// Number of channels
    pub const fn len(&self) -> usize {
        N
    }

    /// Check if the store has no channels
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Smoothing applied to published results
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Slot for a channel
    ///
    /// # Panics
    /// If `channel >= N`.
    pub fn slot(&self, channel: usize) -> &ResultSlot {
        check_channel::<N>(channel);
        &self.slots[channel]
    }

    /// Check if a channel has a result that no reader has consumed
    ///
    /// Does not clear the flag. Callers that need a deadline on a blocking
    /// read can poll this instead.
    pub fn has_new(&self, channel: usize) -> bool {
        self.slot(channel).has_new()
    }

    /// Reset every slot to the "no value yet" state
    ///
    /// Must not race with the interrupt handler; call it before the
    /// conversion interrupt is enabled.
    pub fn reset(&self) {
        for slot in &self.slots {
            slot.reset();
        }
    }

    /// Record a finished conversion for `channel`
    ///
    /// Runs inside a critical section so a reader masking interrupts (or on
    /// another core) never sees a half-updated slot.
    pub(crate) fn publish(&self, channel: usize, raw: u16) {
        let slot = self.slot(channel);
        critical_section::with(|_| slot.publish(raw, self.smoothing));
    }
}

#[inline]
pub(crate) fn check_channel<const N: usize>(channel: usize) {
    assert!(
        channel < N,
        "channel {} out of range ({} channels)",
        channel,
        N
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store: ResultStore<4> = ResultStore::new(Smoothing::Disabled);
        assert_eq!(store.len(), 4);
        for ch in 0..4 {
            assert!(!store.has_new(ch));
            assert_eq!(store.slot(ch).raw(), 0);
        }
    }

    #[test]
    fn test_publish_only_touches_one_channel() {
        let store: ResultStore<3> = ResultStore::new(Smoothing::Disabled);
        store.publish(1, 77);
        assert!(!store.has_new(0));
        assert!(store.has_new(1));
        assert!(!store.has_new(2));
        assert_eq!(store.slot(1).raw(), 77);
    }

    #[test]
    fn test_reset_clears_all() {
        let store: ResultStore<2> = ResultStore::new(Smoothing::EXPONENTIAL);
        store.publish(0, 10);
        store.publish(1, 20);
        store.reset();
        assert!(!store.has_new(0));
        assert!(!store.has_new(1));
        assert_eq!(store.slot(1).smoothed(), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_channel_panics() {
        let store: ResultStore<2> = ResultStore::new(Smoothing::Disabled);
        store.has_new(2);
    }
}
