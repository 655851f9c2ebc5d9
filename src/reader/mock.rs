// src/reader/mock.rs

// Scripted bus used by the reader tests. Each reset starts a new attempt and
// takes the next fault from the script; an empty script means a clean answer.

use crate::common::{calculate_crc8, BatteryRecord, DeviceIdentifier, OneWireBus};
use crate::common::record::BATTERY_INFO_MAGIC;
use std::collections::VecDeque;
use std::vec::Vec;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockBusError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Fault {
    NoPresence,
    CommandCrc,
    PayloadCrc,
    /// Echo CRC, then only this many bytes of the field.
    Truncated(usize),
    /// Presence pulse, then nothing.
    Silent,
}

pub(crate) struct MockBus {
    record: BatteryRecord,
    script: VecDeque<Fault>,
    current: Option<Fault>,
    responses: VecDeque<u8>,
    pub resets: usize,
    pub writes: Vec<Vec<u8>>,
}

impl MockBus {
    pub fn new(record: BatteryRecord) -> Self {
        MockBus {
            record,
            script: VecDeque::new(),
            current: None,
            responses: VecDeque::new(),
            resets: 0,
            writes: Vec::new(),
        }
    }

    pub fn with_id(id: u32) -> Self {
        Self::new(BatteryRecord::with_identifier(BATTERY_INFO_MAGIC, DeviceIdentifier::new(id)))
    }

    /// Queues faults for the next attempts, in order.
    pub fn fail_with(mut self, faults: &[Fault]) -> Self {
        self.script.extend(faults.iter().copied());
        self
    }
}

impl OneWireBus for MockBus {
    type Error = MockBusError;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.resets += 1;
        self.responses.clear();
        self.current = self.script.pop_front();
        if self.current == Some(Fault::NoPresence) {
            return Err(MockBusError);
        }
        Ok(())
    }

    fn write_block(&mut self, bytes: &[u8]) {
        self.writes.push(bytes.to_vec());
        if self.current == Some(Fault::Silent) {
            return;
        }

        let mut echo = calculate_crc8(&bytes[1..]);
        if self.current == Some(Fault::CommandCrc) {
            echo ^= 0x5A;
        }
        self.responses.push_back(echo);

        let data = self.record.as_bytes();
        if let Some(Fault::Truncated(len)) = self.current {
            self.responses.extend(data[..len].iter().copied());
            return;
        }
        self.responses.extend(data.iter().copied());
        let mut crc = calculate_crc8(data);
        if self.current == Some(Fault::PayloadCrc) {
            crc = !crc;
        }
        self.responses.push_back(crc);
    }

    fn read_byte(&mut self) -> u8 {
        // Idle line reads as ones.
        self.responses.pop_front().unwrap_or(0xFF)
    }
}
