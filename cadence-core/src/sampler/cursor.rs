//! Round-robin channel cursor

/// Index of the channel currently being converted
///
/// Always in `0..N`. Only the interrupt handler moves it, one step per
/// completed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerCursor<const N: usize> {
    index: usize,
}

impl<const N: usize> Default for SamplerCursor<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SamplerCursor<N> {
    /// Cursor at channel 0
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Current channel
    pub fn get(&self) -> usize {
        self.index
    }

    /// Step to the next channel, wrapping after the last one
    ///
    /// Returns the new position.
    pub fn advance(&mut self) -> usize {
        self.index = if self.index + 1 >= N { 0 } else { self.index + 1 };
        self.index
    }

    /// Back to channel 0
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
