// src/reader/mod.rs

use crate::common::{
    commands::ReadMemoryCommand,
    crc::CrcMismatch,
    error::ProtocolError,
    hal_traits::OneWireBus,
    identity::{classify, BatteryVendor, DeviceIdentifier, ResistanceCode},
    record::{BatteryRecord, RECORD_LEN},
};
use log::{debug, error, info, warn};

#[cfg(feature = "std")]
mod shared;

#[cfg(feature = "std")]
pub use shared::{global, BatteryIdentityReader, FamilyDriver};

#[cfg(test)]
pub(crate) mod mock;

/// Total number of handshake attempts before giving up.
pub const ATTACH_ATTEMPTS: usize = 5;

/// Runs the BQ2022 read handshake and returns the stored identifier.
///
/// Each attempt is: reset, `SKIP ROM` + `READ MEMORY FIELD CRC` at address 0,
/// check the command echo CRC, read the 128-byte field, check the field CRC.
/// A missing presence pulse or a CRC mismatch costs one attempt. A record that
/// arrives intact but carries the wrong magic fails at once.
///
/// Taking the bus by `&mut` keeps anyone else off it for the whole sequence.
pub fn read_identity<B: OneWireBus>(bus: &mut B) -> Result<DeviceIdentifier, ProtocolError<B::Error>> {
    for attempt in 1..=ATTACH_ATTEMPTS {
        debug!("bq2022: read attempt {}/{}", attempt, ATTACH_ATTEMPTS);

        match read_record(bus) {
            Ok(record) => {
                let id = record.validate::<B::Error>().map_err(|e| {
                    error!("bq2022: invalid battery info magic ({:?})", record);
                    e
                })?;
                debug!("bq2022: battery id {}", id);
                return Ok(id);
            }
            Err(ProtocolError::BusResetFailure(e)) => {
                warn!("bq2022: bus reset failed, retrying ({:?})", e);
            }
            Err(e) if e.is_transient() => {
                error!("bq2022: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    error!("bq2022: fatal error, no valid read in {} attempts", ATTACH_ATTEMPTS);
    Err(ProtocolError::RetriesExhausted { attempts: ATTACH_ATTEMPTS })
}

/// One pass of the handshake, stopping at the first fault.
fn read_record<B: OneWireBus>(bus: &mut B) -> Result<BatteryRecord, ProtocolError<B::Error>> {
    bus.reset().map_err(ProtocolError::BusResetFailure)?;

    let command = ReadMemoryCommand::FROM_START.to_bytes();
    bus.write_block(&command);

    let echo = bus.read_byte();
    // Through the bus, so a master with its own CRC unit is honoured.
    CrcMismatch::check(bus.crc8(ReadMemoryCommand::crc_covered(&command)), echo)
        .map_err(ProtocolError::command_crc)?;

    let mut data = [0u8; RECORD_LEN];
    bus.read_block(&mut data);

    let crc = bus.read_byte();
    CrcMismatch::check(bus.crc8(&data), crc).map_err(ProtocolError::payload_crc)?;

    Ok(BatteryRecord::from_bytes(data))
}

/// Identity of the attached battery, if one has been read.
///
/// Only a successful `attach` sets it and only `detach` clears it; a failed
/// attach leaves whatever was there.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ReaderState {
    identity: Option<DeviceIdentifier>,
}

impl ReaderState {
    pub const fn new() -> Self {
        ReaderState { identity: None }
    }

    /// Reads the chip on `bus` and stores its identifier.
    pub fn attach<B: OneWireBus>(&mut self, bus: &mut B) -> Result<DeviceIdentifier, ProtocolError<B::Error>> {
        let id = read_identity(bus)?;
        self.identity = Some(id);
        info!("bq2022: attached battery {} (code {:#x})", id, classify(id).value());
        Ok(id)
    }

    /// Forgets the stored identifier. No bus traffic.
    pub fn detach(&mut self) {
        if self.identity.take().is_some() {
            info!("bq2022: detached");
        }
    }

    #[inline]
    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }

    #[inline]
    pub fn identifier(&self) -> Option<DeviceIdentifier> {
        self.identity
    }

    /// Resistance code of the stored identifier; unclassified when nothing is
    /// stored or the identifier is unknown.
    pub fn classification(&self) -> ResistanceCode {
        self.identity.map(classify).unwrap_or(ResistanceCode::UNCLASSIFIED)
    }

    pub fn vendor(&self) -> Option<BatteryVendor> {
        self.identity.and_then(BatteryVendor::from_identifier)
    }
}
