//! Free-running round-robin sampler
//!
//! # Usage
//!
//! The board owns the sampler (typically in a critical-section mutex) and
//! calls [`Sampler::on_conversion_complete`] from the conversion interrupt.
//!
//! ```ignore
//! static STORE: ResultStore<5> = ResultStore::new(Smoothing::Disabled);
//!
//! let mut sampler = Sampler::new(engine, TABLE, EngineConfig::default());
//! sampler.initialize(&STORE)?;
//! // enable the conversion interrupt
//!
//! // In the conversion-complete interrupt:
//! sampler.on_conversion_complete(&STORE);
//! ```

use cadence_hal::ConversionEngine;

use crate::channel::ChannelTable;
use crate::config::{EngineConfig, ReadyWait};
use crate::error::InitError;
use crate::sampler::SamplerCursor;
use crate::store::ResultStore;

/// Round-robin sampler over `N` channels
pub struct Sampler<E: ConversionEngine, const N: usize> {
    engine: E,
    table: ChannelTable<E::Selector, N>,
    cursor: SamplerCursor<N>,
    config: EngineConfig,
    /// Completed conversions since initialization (wrapping)
    conversions: u32,
}

impl<E: ConversionEngine, const N: usize> Sampler<E, N> {
    /// Create a sampler
    ///
    /// Nothing touches the hardware until [`initialize`](Self::initialize).
    pub fn new(engine: E, table: ChannelTable<E::Selector, N>, config: EngineConfig) -> Self {
        Self {
            engine,
            table,
            cursor: SamplerCursor::new(),
            config,
            conversions: 0,
        }
    }

    /// Configure the engine, wait for it, clear `store` and arm the first
    /// conversion on channel 0
    ///
    /// Call before the conversion interrupt is enabled. With
    /// [`ReadyWait::Forever`] this does not return until the engine reports
    /// ready.
    pub fn initialize(&mut self, store: &ResultStore<N>) -> Result<(), InitError> {
        self.engine
            .configure(self.config.reference, self.config.clock_divider);
        self.wait_ready()?;

        store.reset();
        self.cursor.reset();
        self.conversions = 0;

        // Kick off the first conversion, the handler keeps it going
        self.engine.arm_conversion(self.table.selector(0));
        Ok(())
    }

    fn wait_ready(&self) -> Result<(), InitError> {
        match self.config.ready_wait {
            ReadyWait::Forever => {
                while !self.engine.status_ready() {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            ReadyWait::Bounded { max_polls } => {
                for _ in 0..max_polls {
                    if self.engine.status_ready() {
                        return Ok(());
                    }
                    core::hint::spin_loop();
                }
                Err(InitError::NotReady { polls: max_polls })
            }
        }
    }

    /// Conversion-complete handler
    ///
    /// Publishes the finished result for the current channel, steps the
    /// cursor and immediately arms the next conversion. Never blocks and
    /// never allocates.
    pub fn on_conversion_complete(&mut self, store: &ResultStore<N>) {
        let raw = self.engine.read_last_result();
        let channel = self.cursor.get();
        store.publish(channel, raw);
        self.conversions = self.conversions.wrapping_add(1);

        let next = self.cursor.advance();
        self.engine.arm_conversion(self.table.selector(next));
    }

    /// Channel whose conversion is in flight
    pub fn cursor(&self) -> usize {
        self.cursor.get()
    }

    /// Completed conversions since initialization
    pub fn conversions(&self) -> u32 {
        self.conversions
    }

    /// Channel table
    pub fn table(&self) -> &ChannelTable<E::Selector, N> {
        &self.table
    }

    /// Get access to the underlying engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get mutable access to the underlying engine
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Release the engine
    pub fn into_engine(self) -> E {
        self.engine
    }
}
