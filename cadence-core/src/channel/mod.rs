//! Channel table
//!
//! Maps logical channel indices to the physical selectors the conversion
//! engine understands.

pub mod table;

pub use table::ChannelTable;
