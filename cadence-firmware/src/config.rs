//! Build-time sampler configuration
//!
//! The channel table and sampler options are generated by `build.rs` from
//! `sampler.toml`, so the table is fixed when the firmware is built.

use cadence_core::{ChannelTable, EngineConfig, ReadyWait, SamplerConfig, Smoothing};
use cadence_hal::ReferenceMode;
use cadence_hal_rp2040::AdcInput;

include!(concat!(env!("OUT_DIR"), "/sampler_config.rs"));
