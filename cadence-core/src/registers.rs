//! Register windows for bulk export
//!
//! A bus peripheral (for example an I2C target) can publish every channel
//! at once through two read-only windows:
//!
//! - `0xD0`: one little-endian `u16` per channel, full 10-bit values
//! - `0xE0`: one byte per channel, values narrowed to 8 bits
//!
//! Reading a window never consumes a result.

use cadence_hal::{narrow_to_8bit, RESULT_MAX};
use heapless::Vec;

use crate::store::ResultStore;

/// Maximum channels a window can carry
pub const MAX_CHANNELS: usize = 16;

/// Largest window in bytes
pub const MAX_WINDOW_LEN: usize = MAX_CHANNELS * 2;

/// Encoded window contents
pub type WindowBytes = Vec<u8, MAX_WINDOW_LEN>;

/// Errors from window encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowError {
    /// More channels than a window can hold
    TooManyChannels,
    /// Byte count does not match the window layout
    Truncated,
}

/// Register window layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Window {
    /// Full-resolution values, two bytes per channel
    Adc10,
    /// Narrowed values, one byte per channel
    Adc8,
}

impl Window {
    /// Look up a window by its start register
    pub fn from_register(register: u8) -> Option<Self> {
        match register {
            0xD0 => Some(Window::Adc10),
            0xE0 => Some(Window::Adc8),
            _ => None,
        }
    }

    /// Start register of this window
    pub fn register(self) -> u8 {
        match self {
            Window::Adc10 => 0xD0,
            Window::Adc8 => 0xE0,
        }
    }

    /// Bytes per channel
    pub fn width(self) -> usize {
        match self {
            Window::Adc10 => 2,
            Window::Adc8 => 1,
        }
    }

    /// Window size in bytes for `channels` channels
    pub fn len(self, channels: usize) -> usize {
        channels * self.width()
    }

    /// Encode channel values into this window's layout
    ///
    /// Values above [`RESULT_MAX`] are clamped to it.
    pub fn encode(self, values: &[u16]) -> Result<WindowBytes, WindowError> {
        if values.len() > MAX_CHANNELS {
            return Err(WindowError::TooManyChannels);
        }

        let mut bytes = WindowBytes::new();
        for &value in values {
            let value = value.min(RESULT_MAX);
            let pushed = match self {
                Window::Adc10 => bytes.extend_from_slice(&value.to_le_bytes()),
                Window::Adc8 => bytes.push(narrow_to_8bit(value)).map_err(|_| ()),
            };
            // Capacity is checked above
            pushed.map_err(|_| WindowError::TooManyChannels)?;
        }
        Ok(bytes)
    }

    /// Decode window bytes back into per-channel values
    ///
    /// Values from [`Window::Adc8`] come back in the 8-bit range.
    pub fn decode(self, bytes: &[u8]) -> Result<Vec<u16, MAX_CHANNELS>, WindowError> {
        if bytes.len() % self.width() != 0 {
            return Err(WindowError::Truncated);
        }
        if bytes.len() / self.width() > MAX_CHANNELS {
            return Err(WindowError::TooManyChannels);
        }

        let mut values = Vec::new();
        for chunk in bytes.chunks_exact(self.width()) {
            let value = match self {
                Window::Adc10 => u16::from_le_bytes([chunk[0], chunk[1]]),
                Window::Adc8 => u16::from(chunk[0]),
            };
            values
                .push(value)
                .map_err(|_| WindowError::TooManyChannels)?;
        }
        Ok(values)
    }
}

impl<const N: usize> ResultStore<N> {
    /// Current contents of a register window
    ///
    /// Taken from one consistent [`peek_all`](Self::peek_all) snapshot.
    pub fn window(&self, window: Window) -> Result<WindowBytes, WindowError> {
        window.encode(&self.peek_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Smoothing;

    #[test]
    fn test_register_lookup() {
        assert_eq!(Window::from_register(0xD0), Some(Window::Adc10));
        assert_eq!(Window::from_register(0xE0), Some(Window::Adc8));
        assert_eq!(Window::from_register(0x00), None);
        assert_eq!(Window::Adc10.register(), 0xD0);
        assert_eq!(Window::Adc8.len(7), 7);
        assert_eq!(Window::Adc10.len(7), 14);
    }

    #[test]
    fn test_adc10_layout_is_little_endian() {
        let bytes = Window::Adc10.encode(&[0x3FF, 0x102]).unwrap();
        assert_eq!(bytes.as_slice(), &[0xFF, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_adc8_layout_narrows() {
        let bytes = Window::Adc8.encode(&[1023, 4, 2]).unwrap();
        assert_eq!(bytes.as_slice(), &[255, 1, 0]);
    }

    #[test]
    fn test_encode_clamps_to_result_range() {
        let bytes = Window::Adc8.encode(&[2048, 1024, u16::MAX]).unwrap();
        assert_eq!(bytes.as_slice(), &[255, 255, 255]);

        let bytes = Window::Adc10.encode(&[2048]).unwrap();
        assert_eq!(bytes.as_slice(), &[0xFF, 0x03]);
    }

    #[test]
    fn test_decode_adc10() {
        let values = Window::Adc10.decode(&[0xFF, 0x03, 0x00, 0x02]).unwrap();
        assert_eq!(values.as_slice(), &[1023, 512]);
    }

    #[test]
    fn test_decode_odd_length() {
        assert_eq!(
            Window::Adc10.decode(&[0x01, 0x02, 0x03]),
            Err(WindowError::Truncated)
        );
    }

    #[test]
    fn test_too_many_channels() {
        let values = [0u16; MAX_CHANNELS + 1];
        assert_eq!(
            Window::Adc8.encode(&values),
            Err(WindowError::TooManyChannels)
        );
        assert_eq!(
            Window::Adc8.decode(&[0u8; MAX_CHANNELS + 1]),
            Err(WindowError::TooManyChannels)
        );
    }

    #[test]
    fn test_store_window_does_not_consume() {
        let store: ResultStore<3> = ResultStore::new(Smoothing::Disabled);
        store.publish(0, 1000);
        store.publish(2, 8);

        let bytes = store.window(Window::Adc8).unwrap();
        assert_eq!(bytes.as_slice(), &[250, 0, 2]);
        assert!(store.has_new(0));

        let values = Window::Adc10
            .decode(&store.window(Window::Adc10).unwrap())
            .unwrap();
        assert_eq!(values.as_slice(), &[1000, 0, 8]);
    }
}
