//! Serial-port view of the loader's byte services.
//!
//! One trait call maps to exactly one resident call; no framing, no
//! buffering, nothing kept in flight.

use core::convert::Infallible;
use core::fmt;

use crate::{receive, send};

/// The resident loader's console, as an embedded-hal serial port.
///
/// Zero-sized; make as many as you like, they all talk to the same loader.
pub struct LoaderPort;

impl LoaderPort {
    pub const fn new() -> Self {
        LoaderPort
    }
}

impl embedded_hal::serial::Read<u8> for LoaderPort {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        // rx-byte already blocks, so WouldBlock never surfaces.
        Ok(receive())
    }
}

impl embedded_hal::serial::Write<u8> for LoaderPort {
    type Error = Infallible;

    fn write(&mut self, unit: u8) -> nb::Result<(), Self::Error> {
        send(unit);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        // tx-byte transmits before returning; nothing is ever pending.
        Ok(())
    }
}

impl embedded_hal::blocking::serial::write::Default<u8> for LoaderPort {}

impl fmt::Write for LoaderPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for unit in s.bytes() {
            send(unit);
        }
        Ok(())
    }
}
