//! Idle hooks for blocking reads

use cadence_hal::IdleHook;

/// Sleep until the next interrupt
///
/// Every conversion raises `ADC_IRQ_FIFO`, so a blocked reader wakes at
/// least once per conversion to re-check its channel.
///
/// The `has_new` check and the `wfi` are not atomic. If the handler runs
/// between them, the reader sleeps until the following interrupt, so a
/// blocking read can return up to one conversion period late. It never
/// misses the result, which stays flagged until consumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaitForInterrupt;

impl IdleHook for WaitForInterrupt {
    fn idle(&mut self) {
        cortex_m::asm::wfi();
    }
}
