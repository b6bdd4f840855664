//! Idle hooks
//!
//! A reader that blocks for a fresh sample calls its idle hook once per
//! poll. Boards can use this to sleep until the next interrupt or to run
//! housekeeping work.

/// Work to perform while waiting for a new sample
pub trait IdleHook {
    /// Called once per poll of the wait loop
    fn idle(&mut self);
}

/// Busy-spin idle hook
///
/// Issues a spin-loop hint and returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin;

impl IdleHook for Spin {
    #[inline]
    fn idle(&mut self) {
        core::hint::spin_loop();
    }
}

// Closures can be used directly as idle hooks
impl<F: FnMut()> IdleHook for F {
    fn idle(&mut self) {
        self()
    }
}
