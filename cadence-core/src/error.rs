//! Sampler errors

/// Errors that can occur while starting the sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Analog subsystem did not report ready within the bounded wait
    NotReady {
        /// Status polls performed before giving up
        polls: u32,
    },
}
