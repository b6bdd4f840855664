//! Fixed channel table

/// Ordered mapping of logical channel index to physical selector
///
/// The table is fixed when it is built and never changes. Logical index
/// `i` is sampled as the `i`th step of every round-robin cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelTable<S, const N: usize> {
    selectors: [S; N],
}

impl<S: Copy, const N: usize> ChannelTable<S, N> {
    /// Create a channel table
    ///
    /// # Panics
    /// If `N` is zero. In a `const` context this is a build error.
    pub const fn new(selectors: [S; N]) -> Self {
        assert!(N >= 1, "channel table needs at least one channel");
        Self { selectors }
    }

    /// Number of channels
    pub const fn len(&self) -> usize {
        N
    }

    /// Always false: a table holds at least one channel
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Physical selector for a logical channel
    ///
    /// # Panics
    /// If `channel >= N`.
    pub fn selector(&self, channel: usize) -> S {
        assert!(
            channel < N,
            "channel index out of range for channel table"
        );
        self.selectors[channel]
    }

    /// All selectors in sampling order
    pub fn selectors(&self) -> &[S; N] {
        &self.selectors
    }

    /// Iterate over `(logical index, selector)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, S)> + '_ {
        self.selectors.iter().copied().enumerate()
    }
}
