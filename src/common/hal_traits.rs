// src/common/hal_traits.rs

use core::fmt::Debug;

/// Abstraction for a blocking 1-Wire bus master.
///
/// The driver only needs byte-level access plus the reset/presence cycle; bit
/// timing is the implementor's business (see `bitbang::BitBangBus` for a
/// pin-level implementation, or wrap a bridge chip such as a DS2482).
///
/// Writes do not report failure. A corrupted transmission shows up as a CRC
/// mismatch on the following reads, which the driver already checks.
pub trait OneWireBus {
    /// Associated error type for reset failures.
    type Error: Debug;

    /// Issues a reset pulse and waits for a presence pulse.
    ///
    /// Returns `Ok(())` only if at least one device answered.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Writes `bytes` onto the bus, least significant bit first.
    fn write_block(&mut self, bytes: &[u8]);

    /// Reads a single byte from the bus.
    fn read_byte(&mut self) -> u8;

    /// Fills `buf` with bytes read from the bus.
    fn read_block(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = self.read_byte();
        }
    }

    /// Computes the Dallas/Maxim CRC-8 over `bytes`.
    ///
    /// Override this if the master has a faster or hardware CRC unit.
    fn crc8(&self, bytes: &[u8]) -> u8 {
        super::crc::calculate_crc8(bytes)
    }
}

impl<B: OneWireBus + ?Sized> OneWireBus for &mut B {
    type Error = B::Error;

    fn reset(&mut self) -> Result<(), Self::Error> {
        (**self).reset()
    }

    fn write_block(&mut self, bytes: &[u8]) {
        (**self).write_block(bytes)
    }

    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }

    fn read_block(&mut self, buf: &mut [u8]) {
        (**self).read_block(buf)
    }

    fn crc8(&self, bytes: &[u8]) -> u8 {
        (**self).crc8(bytes)
    }
}
