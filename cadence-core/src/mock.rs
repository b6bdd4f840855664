//! Mock conversion engine for host tests

use core::cell::Cell;

use cadence_hal::{ConversionEngine, ReferenceMode};

/// Engine that hands out a preset result and records what it was asked
pub struct MockEngine {
    /// Result returned by the next `read_last_result`
    pub result: u16,
    /// Selectors passed to `arm_conversion`, in order
    pub armed: Vec<u8>,
    /// Last `configure` call
    pub configured: Option<(ReferenceMode, u16)>,
    /// Number of `status_ready` polls answered "not ready" before "ready"
    pub not_ready_polls: u32,
    /// Number of `status_ready` polls so far
    pub polls: Cell<u32>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            result: 0,
            armed: Vec::new(),
            configured: None,
            not_ready_polls: 0,
            polls: Cell::new(0),
        }
    }

    /// Engine that reports ready only after `polls` status reads
    pub fn ready_after(polls: u32) -> Self {
        Self {
            not_ready_polls: polls,
            ..Self::new()
        }
    }
}

impl ConversionEngine for MockEngine {
    type Selector = u8;

    fn configure(&mut self, reference: ReferenceMode, clock_divider: u16) {
        self.configured = Some((reference, clock_divider));
    }

    fn status_ready(&self) -> bool {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        polls > self.not_ready_polls
    }

    fn arm_conversion(&mut self, selector: u8) {
        self.armed.push(selector);
    }

    fn read_last_result(&mut self) -> u16 {
        self.result
    }
}
