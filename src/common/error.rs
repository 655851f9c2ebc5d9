// src/common/error.rs

use super::crc::CrcMismatch;

/// Failures of the BQ2022 read handshake.
///
/// The first three variants describe a single failed attempt and are retried
/// by the reader. `RetriesExhausted` and `InvalidMagic` are terminal.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError<E = ()>
where
    E: core::fmt::Debug, // Need Debug for the generic bus error
{
    /// Reset pulse produced no presence pulse, or the bus reported a fault.
    #[error("bus reset failed: {0:?}")]
    BusResetFailure(E),

    /// CRC echoed after the command/address bytes did not match.
    #[error("command CRC mismatch: expected {expected:#04x}, calculated {calculated:#04x}")]
    CommandCrcMismatch { expected: u8, calculated: u8 },

    /// CRC sent after the memory field did not match the data read.
    #[error("payload CRC mismatch: expected {expected:#04x}, calculated {calculated:#04x}")]
    PayloadCrcMismatch { expected: u8, calculated: u8 },

    /// Every attempt of the retry budget failed with a transient fault.
    #[error("gave up after {attempts} attempts")]
    RetriesExhausted { attempts: usize },

    /// Memory was read intact but does not hold battery information.
    #[error("invalid battery info magic: {found:#010x}")]
    InvalidMagic { found: u32 },
}

impl<E: core::fmt::Debug> ProtocolError<E> {
    /// Whether the fault is a line/transmission problem worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProtocolError::BusResetFailure(_)
                | ProtocolError::CommandCrcMismatch { .. }
                | ProtocolError::PayloadCrcMismatch { .. }
        )
    }

    pub(crate) fn command_crc(m: CrcMismatch) -> Self {
        ProtocolError::CommandCrcMismatch { expected: m.expected, calculated: m.calculated }
    }

    pub(crate) fn payload_crc(m: CrcMismatch) -> Self {
        ProtocolError::PayloadCrcMismatch { expected: m.expected, calculated: m.calculated }
    }
}
