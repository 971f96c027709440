//! # Printer Transport Layer
//!
//! A [`Transport`] is anything that can take a finished command and hand it
//! to a printer. The session never interprets, buffers, or retries: whatever
//! the transport reports is returned to the caller as-is.
//!
//! ## Available Transports
//!
//! - [`network`]: raw TCP (port 9100) for networked QL models
//! - [`device`]: a character device such as `/dev/usb/lp0` or `/dev/rfcomm0`
//! - `Vec<u8>`: captures bytes in memory (tests, `--out` files, dry runs)

pub mod device;
pub mod network;

pub use device::DeviceTransport;
pub use network::NetworkTransport;

use crate::error::TransportError;

/// Sink for encoded printer commands.
pub trait Transport {
    /// Transmit one complete command.
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;
}

impl Transport for Vec<u8> {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.extend_from_slice(data);
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        (**self).send(data)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        (**self).send(data)
    }
}
