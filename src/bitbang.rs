// src/bitbang.rs

//! A 1-Wire master driven from a single open-drain GPIO.
//!
//! `set_high` must release the line (pulled up externally) rather than drive
//! it, and `is_high`/`is_low` must read the actual line level. Most HALs
//! provide this as an open-drain output that also implements `InputPin`.
//!
//! Timing is standard speed. Interrupts should be masked by the caller for the
//! duration of a transaction if they can stretch a slot by more than a few µs.

use crate::common::{hal_traits::OneWireBus, timing};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

#[derive(Debug, thiserror::Error)]
pub enum BitBangError<E>
where
    E: core::fmt::Debug,
{
    /// Nothing pulled the line low after the reset pulse.
    #[error("no presence pulse")]
    NoPresence,

    /// GPIO access failed. Faults during write/read slots are reported by the
    /// next reset.
    #[error("pin error: {0:?}")]
    Pin(E),
}

/// Bit-banged bus over an open-drain pin and a delay provider.
pub struct BitBangBus<P: ErrorType, D> {
    pin: P,
    delay: D,
    fault: Option<P::Error>,
}

impl<P, D> BitBangBus<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        BitBangBus { pin, delay, fault: None }
    }

    /// Returns the pin and delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    // Keeps the first slot-level fault for the next reset.
    fn note<T>(&mut self, result: Result<T, P::Error>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                if self.fault.is_none() {
                    self.fault = Some(e);
                }
                None
            }
        }
    }

    fn write_bit(&mut self, bit: bool) {
        let (low, high) = if bit {
            (timing::WRITE_ONE_LOW_US, timing::WRITE_ONE_HIGH_US)
        } else {
            (timing::WRITE_ZERO_LOW_US, timing::WRITE_ZERO_HIGH_US)
        };
        let r = self.pin.set_low();
        self.note(r);
        self.delay.delay_us(low);
        let r = self.pin.set_high();
        self.note(r);
        self.delay.delay_us(high);
    }

    fn read_bit(&mut self) -> bool {
        let r = self.pin.set_low();
        self.note(r);
        self.delay.delay_us(timing::READ_INIT_LOW_US);
        let r = self.pin.set_high();
        self.note(r);
        self.delay.delay_us(timing::READ_SAMPLE_US);
        let r = self.pin.is_high();
        // A failed sample reads as an idle (high) line.
        let bit = self.note(r).unwrap_or(true);
        self.delay.delay_us(timing::READ_RECOVERY_US);
        bit
    }
}

impl<P, D> OneWireBus for BitBangBus<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    type Error = BitBangError<P::Error>;

    fn reset(&mut self) -> Result<(), Self::Error> {
        if let Some(e) = self.fault.take() {
            return Err(BitBangError::Pin(e));
        }

        self.pin.set_low().map_err(BitBangError::Pin)?;
        self.delay.delay_us(timing::RESET_LOW_US);
        self.pin.set_high().map_err(BitBangError::Pin)?;
        self.delay.delay_us(timing::PRESENCE_SAMPLE_US);
        let present = self.pin.is_low().map_err(BitBangError::Pin)?;
        self.delay.delay_us(timing::RESET_RECOVERY_US);

        if present {
            Ok(())
        } else {
            Err(BitBangError::NoPresence)
        }
    }

    fn write_block(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            for i in 0..8 {
                self.write_bit(byte & (1 << i) != 0);
            }
        }
    }

    fn read_byte(&mut self) -> u8 {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit() {
                byte |= 1 << i;
            }
        }
        byte
    }
}
